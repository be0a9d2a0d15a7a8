//! Campaign record types.
//!
//! Characters and gods carry the data that stat resolution and the command
//! interpreter work over. Shops, towns, shopkeeps and taverns are flat
//! world-building records that only point at each other by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Case-insensitive name comparison used for every lookup.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Trim, drop empties and de-duplicate (case-insensitively), keeping the
/// first spelling seen.
pub(crate) fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || out.iter().any(|n| names_match(n, name)) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn price_list(prices: &BTreeMap<String, f64>) -> String {
    if prices.is_empty() {
        return "None".to_string();
    }
    prices
        .iter()
        .map(|(item, price)| format!("{item}: {price} gp"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Lower-case key used in campaign files and commands.
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// A name that is not one of the six abilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an ability")]
pub struct UnknownAbility(pub String);

impl FromStr for Ability {
    type Err = UnknownAbility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Ability::all()
            .into_iter()
            .find(|a| a.key() == key)
            .ok_or_else(|| UnknownAbility(s.trim().to_string()))
    }
}

/// Per-ability modifiers. Keys missing from a campaign file read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityModifiers {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityModifiers {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Skill catalog. Every skill is governed by exactly one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
    SocialInteraction,
}

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception
            | Skill::Intimidation
            | Skill::Performance
            | Skill::Persuasion
            | Skill::SocialInteraction => Ability::Charisma,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Athletics",
            Skill::Acrobatics => "Acrobatics",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Arcana => "Arcana",
            Skill::History => "History",
            Skill::Investigation => "Investigation",
            Skill::Nature => "Nature",
            Skill::Religion => "Religion",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Insight => "Insight",
            Skill::Medicine => "Medicine",
            Skill::Perception => "Perception",
            Skill::Survival => "Survival",
            Skill::Deception => "Deception",
            Skill::Intimidation => "Intimidation",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::SocialInteraction => "Social Interaction",
        }
    }

    /// Lower-case key, as typed in commands and stored in proficiency lists.
    pub fn key(&self) -> String {
        self.name().to_lowercase()
    }

    pub fn all() -> [Skill; 19] {
        [
            Skill::Athletics,
            Skill::Acrobatics,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Arcana,
            Skill::History,
            Skill::Investigation,
            Skill::Nature,
            Skill::Religion,
            Skill::AnimalHandling,
            Skill::Insight,
            Skill::Medicine,
            Skill::Perception,
            Skill::Survival,
            Skill::Deception,
            Skill::Intimidation,
            Skill::Performance,
            Skill::Persuasion,
            Skill::SocialInteraction,
        ]
    }

    /// Look a skill up by its name, ignoring case.
    pub fn from_name(name: &str) -> Option<Skill> {
        let key = name.trim().to_lowercase();
        Skill::all().into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Proficiency bonus by character level.
///
/// Levels outside 1-20 have no bonus.
pub fn proficiency_bonus_for_level(level: u8) -> i32 {
    match level {
        1..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        17..=20 => 6,
        _ => 0,
    }
}

// ============================================================================
// Characters
// ============================================================================

/// What a character can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    pub bonus_actions: bool,
    pub extra_attacks: u32,
    pub actions: u32,
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            bonus_actions: false,
            extra_attacks: 0,
            actions: 1,
        }
    }
}

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub race: String,
    pub char_class: String,
    pub level: u8,
    pub sub_class: String,
    pub ability_modifiers: AbilityModifiers,
    /// Skills (or raw abilities) the character is proficient in, lower-case.
    pub proficiencies: Vec<String>,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    pub actions: Actions,
    /// Name of the deity worshipped. Need not match a recorded god.
    pub god: String,
    /// Explicit bonus. When absent the bonus is derived from level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_bonus: Option<i32>,
}

impl Character {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            race: String::new(),
            char_class: String::new(),
            level,
            sub_class: String::new(),
            ability_modifiers: AbilityModifiers::default(),
            proficiencies: Vec::new(),
            saving_throws: Vec::new(),
            actions: Actions::default(),
            god: String::new(),
            proficiency_bonus: None,
        }
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>, sub_class: impl Into<String>) -> Self {
        self.char_class = class.into();
        self.sub_class = sub_class.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: AbilityModifiers) -> Self {
        self.ability_modifiers = modifiers;
        self
    }

    pub fn with_proficiencies<I, S>(mut self, proficiencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_proficiencies(proficiencies);
        self
    }

    pub fn with_saving_throws(mut self, abilities: impl IntoIterator<Item = Ability>) -> Self {
        self.set_saving_throws(abilities);
        self
    }

    pub fn with_actions(mut self, actions: Actions) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_god(mut self, god: impl Into<String>) -> Self {
        self.god = god.into();
        self
    }

    pub fn with_proficiency_bonus(mut self, bonus: i32) -> Self {
        self.proficiency_bonus = Some(bonus);
        self
    }

    /// Replace the proficiency list, storing names lower-case.
    pub fn set_proficiencies<I, S>(&mut self, proficiencies: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.proficiencies = dedup_names(proficiencies)
            .into_iter()
            .map(|p| p.to_lowercase())
            .collect();
    }

    pub fn set_saving_throws(&mut self, abilities: impl IntoIterator<Item = Ability>) {
        let mut saves = Vec::new();
        for ability in abilities {
            if !saves.contains(&ability) {
                saves.push(ability);
            }
        }
        self.saving_throws = saves;
    }

    /// The stored bonus if one was given, otherwise the level tier.
    pub fn effective_proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
            .unwrap_or_else(|| proficiency_bonus_for_level(self.level))
    }

    pub fn is_proficient(&self, name: &str) -> bool {
        self.proficiencies.iter().any(|p| names_match(p, name))
    }

    pub fn has_saving_throw(&self, ability: Ability) -> bool {
        self.saving_throws.contains(&ability)
    }

    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        let ability_mod = self.ability_modifiers.get(skill.ability());
        if self.is_proficient(&skill.key()) {
            ability_mod + self.effective_proficiency_bonus()
        } else {
            ability_mod
        }
    }

    pub fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        let ability_mod = self.ability_modifiers.get(ability);
        if self.has_saving_throw(ability) {
            ability_mod + self.effective_proficiency_bonus()
        } else {
            ability_mod
        }
    }

    pub fn display_info(&self) -> String {
        let modifiers = Ability::all()
            .iter()
            .map(|a| format!("{} {:+}", a.abbreviation(), self.ability_modifiers.get(*a)))
            .collect::<Vec<_>>()
            .join(", ");
        let saves: Vec<String> = self
            .saving_throws
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        let bonus_source = if self.proficiency_bonus.is_some() {
            "set"
        } else {
            "from level"
        };

        [
            format!("Name: {}", self.name),
            format!("Race: {}", self.race),
            format!("Class: {}", self.char_class),
            format!("Level: {}", self.level),
            format!("Subclass: {}", self.sub_class),
            format!("Ability Modifiers: {modifiers}"),
            format!("Proficiencies: {}", join_or_none(&self.proficiencies)),
            format!("Saving Throws: {}", join_or_none(&saves)),
            format!(
                "Actions: {} action(s), {} extra attack(s), bonus action: {}",
                self.actions.actions,
                self.actions.extra_attacks,
                if self.actions.bonus_actions { "yes" } else { "no" }
            ),
            format!("God: {}", self.god),
            format!(
                "Proficiency Bonus: {:+} ({bonus_source})",
                self.effective_proficiency_bonus()
            ),
        ]
        .join("\n")
    }
}

// ============================================================================
// Gods
// ============================================================================

/// A deity of the campaign setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct God {
    pub name: String,
    /// Domains the god presides over, e.g. "greed".
    pub patronage: Vec<String>,
    pub symbols: String,
    pub notable_followers: Vec<String>,
    pub notes: String,
}

impl God {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patronage: Vec::new(),
            symbols: String::new(),
            notable_followers: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_patronage<I, S>(mut self, patronage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.patronage = dedup_names(patronage);
        self
    }

    pub fn with_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.symbols = symbols.into();
        self
    }

    pub fn with_followers<I, S>(mut self, followers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.notable_followers = dedup_names(followers);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_patron_of(&self, aspect: &str) -> bool {
        self.patronage.iter().any(|p| names_match(p, aspect))
    }

    pub fn display_info(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Patronage: {}", join_or_none(&self.patronage)),
            format!("Symbols: {}", self.symbols),
            format!("Notable Followers: {}", join_or_none(&self.notable_followers)),
            format!("Notes: {}", self.notes),
        ]
        .join("\n")
    }
}

// ============================================================================
// World Building
// ============================================================================

/// Price tier of a tavern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wealth {
    Poor,
    Modest,
    Comfortable,
    Wealthy,
    Aristocratic,
}

impl Wealth {
    pub fn key(&self) -> &'static str {
        match self {
            Wealth::Poor => "poor",
            Wealth::Modest => "modest",
            Wealth::Comfortable => "comfortable",
            Wealth::Wealthy => "wealthy",
            Wealth::Aristocratic => "aristocratic",
        }
    }

    pub fn all() -> [Wealth; 5] {
        [
            Wealth::Poor,
            Wealth::Modest,
            Wealth::Comfortable,
            Wealth::Wealthy,
            Wealth::Aristocratic,
        ]
    }
}

impl fmt::Display for Wealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A name that is not one of the wealth tiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a wealth level (poor, modest, comfortable, wealthy, aristocratic)")]
pub struct UnknownWealth(pub String);

impl FromStr for Wealth {
    type Err = UnknownWealth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Wealth::all()
            .into_iter()
            .find(|w| w.key() == key)
            .ok_or_else(|| UnknownWealth(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    pub town: String,
    pub shop_type: String,
    /// Item name to price in gold pieces.
    pub inventory: BTreeMap<String, f64>,
    pub notes: String,
}

impl Shop {
    pub fn new(name: impl Into<String>, town: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            town: town.into(),
            shop_type: String::new(),
            inventory: BTreeMap::new(),
            notes: String::new(),
        }
    }

    pub fn display_info(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Town: {}", self.town),
            format!("Type: {}", self.shop_type),
            format!("Inventory: {}", price_list(&self.inventory)),
            format!("Notes: {}", self.notes),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub population: u32,
    pub leader: String,
    pub guilds: Vec<String>,
    pub notes: String,
}

impl Town {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: 0,
            leader: String::new(),
            guilds: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn display_info(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Population: {}", self.population),
            format!("Leader: {}", self.leader),
            format!("Guilds: {}", join_or_none(&self.guilds)),
            format!("Notes: {}", self.notes),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopkeep {
    pub name: String,
    pub race: String,
    /// Name of the shop they run.
    pub shop: String,
    pub town: String,
    pub notes: String,
}

impl Shopkeep {
    pub fn display_info(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Race: {}", self.race),
            format!("Shop: {}", self.shop),
            format!("Town: {}", self.town),
            format!("Notes: {}", self.notes),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tavern {
    pub name: String,
    pub town: String,
    pub wealth: Wealth,
    pub owner: String,
    pub menu: BTreeMap<String, f64>,
    pub accommodations: BTreeMap<String, f64>,
    pub notes: String,
}

impl Tavern {
    pub fn new(name: impl Into<String>, town: impl Into<String>, wealth: Wealth) -> Self {
        Self {
            name: name.into(),
            town: town.into(),
            wealth,
            owner: String::new(),
            menu: BTreeMap::new(),
            accommodations: BTreeMap::new(),
            notes: String::new(),
        }
    }

    pub fn display_info(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Town: {}", self.town),
            format!("Wealth: {}", self.wealth),
            format!("Owner: {}", self.owner),
            format!("Menu: {}", price_list(&self.menu)),
            format!("Accommodations: {}", price_list(&self.accommodations)),
            format!("Notes: {}", self.notes),
        ]
        .join("\n")
    }
}
