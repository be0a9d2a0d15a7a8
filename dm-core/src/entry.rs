//! Interactive entry and editing of campaign records.
//!
//! Records are collected one field at a time through a [`Prompter`]. Every
//! typed field is parsed as soon as it is answered; the first value that
//! fails to parse aborts the whole entry and nothing is returned, so a
//! half-filled record never reaches the repository.

use crate::world::{
    dedup_names, Ability, AbilityModifiers, Actions, Character, God, Shop, Shopkeep, Tavern,
    Town, UnknownAbility, UnknownWealth, Wealth,
};
use std::collections::BTreeMap;
use std::io;
use std::str::FromStr;
use thiserror::Error;

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Show `question` and return the answer without its line ending.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Why an entry was abandoned.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("expected true or false for {field}, got '{value}'")]
    InvalidFlag { field: String, value: String },

    #[error("expected item:price for {field}, got '{value}'")]
    InvalidPrice { field: String, value: String },

    #[error(transparent)]
    UnknownAbility(#[from] UnknownAbility),

    #[error(transparent)]
    UnknownWealth(#[from] UnknownWealth),

    /// Reading the answer itself failed. Not recoverable by re-entry.
    #[error("failed to read input: {0}")]
    Prompt(#[from] io::Error),
}

fn ask_text(prompter: &mut dyn Prompter, question: &str) -> Result<String, EntryError> {
    Ok(prompter.ask(question)?.trim().to_string())
}

fn ask_name(
    prompter: &mut dyn Prompter,
    preset: Option<String>,
    question: &str,
) -> Result<String, EntryError> {
    let name = match preset {
        Some(name) => name.trim().to_string(),
        None => ask_text(prompter, question)?,
    };
    if name.is_empty() {
        return Err(EntryError::EmptyName);
    }
    Ok(name)
}

fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, EntryError> {
    value.trim().parse().map_err(|_| EntryError::InvalidNumber {
        field: field.to_string(),
        value: value.trim().to_string(),
    })
}

fn ask_number<T: FromStr>(
    prompter: &mut dyn Prompter,
    question: &str,
    field: &str,
) -> Result<T, EntryError> {
    let answer = prompter.ask(question)?;
    parse_number(field, &answer)
}

/// Blank answers mean "not set".
fn ask_optional_number<T: FromStr>(
    prompter: &mut dyn Prompter,
    question: &str,
    field: &str,
) -> Result<Option<T>, EntryError> {
    let answer = prompter.ask(question)?;
    if answer.trim().is_empty() {
        return Ok(None);
    }
    parse_number(field, &answer).map(Some)
}

fn ask_flag(prompter: &mut dyn Prompter, question: &str, field: &str) -> Result<bool, EntryError> {
    let answer = prompter.ask(question)?;
    match answer.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" => Ok(true),
        "false" | "no" | "n" => Ok(false),
        _ => Err(EntryError::InvalidFlag {
            field: field.to_string(),
            value: answer.trim().to_string(),
        }),
    }
}

/// Comma separated names, trimmed and de-duplicated.
fn ask_list(prompter: &mut dyn Prompter, question: &str) -> Result<Vec<String>, EntryError> {
    let answer = prompter.ask(question)?;
    Ok(dedup_names(answer.split(',')))
}

fn ask_abilities(prompter: &mut dyn Prompter, question: &str) -> Result<Vec<Ability>, EntryError> {
    let mut abilities = Vec::new();
    for name in ask_list(prompter, question)? {
        let ability: Ability = name.parse()?;
        if !abilities.contains(&ability) {
            abilities.push(ability);
        }
    }
    Ok(abilities)
}

/// Comma separated `item:price` pairs.
fn ask_prices(
    prompter: &mut dyn Prompter,
    question: &str,
    field: &str,
) -> Result<BTreeMap<String, f64>, EntryError> {
    let mut prices = BTreeMap::new();
    for entry in ask_list(prompter, question)? {
        let Some((item, price_text)) = entry.rsplit_once(':') else {
            return Err(EntryError::InvalidPrice {
                field: field.to_string(),
                value: entry,
            });
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(EntryError::InvalidPrice {
                field: field.to_string(),
                value: entry.clone(),
            });
        }
        let price: f64 = parse_number(field, price_text)?;
        // Prices must be finite and non-negative to save as JSON numbers.
        if !price.is_finite() || price < 0.0 {
            return Err(EntryError::InvalidNumber {
                field: field.to_string(),
                value: price_text.trim().to_string(),
            });
        }
        prices.insert(item.to_string(), price);
    }
    Ok(prices)
}

fn ask_modifiers(
    prompter: &mut dyn Prompter,
    who: &str,
) -> Result<AbilityModifiers, EntryError> {
    let mut modifiers = AbilityModifiers::default();
    for ability in Ability::all() {
        let value = ask_number(
            prompter,
            &format!("Enter {who}'s {} modifier: ", ability.key()),
            &format!("{} modifier", ability.key()),
        )?;
        modifiers.set(ability, value);
    }
    Ok(modifiers)
}

fn ask_actions(prompter: &mut dyn Prompter, who: &str) -> Result<Actions, EntryError> {
    Ok(Actions {
        bonus_actions: ask_flag(
            prompter,
            &format!("Can {who} perform bonus actions? (True/False): "),
            "bonus actions",
        )?,
        extra_attacks: ask_number(
            prompter,
            &format!("Enter the number of extra attacks {who} has: "),
            "extra attacks",
        )?,
        actions: ask_number(
            prompter,
            &format!("Enter the number of actions {who} can perform: "),
            "actions",
        )?,
    })
}

// ============================================================================
// New Records
// ============================================================================

pub fn collect_character(
    prompter: &mut dyn Prompter,
    name: Option<String>,
) -> Result<Character, EntryError> {
    let name = ask_name(prompter, name, "Enter character's name: ")?;
    let race = ask_text(prompter, "Enter character's race: ")?;
    let char_class = ask_text(prompter, "Enter character's class: ")?;
    let level: u8 = ask_number(prompter, "Enter character's level: ", "level")?;
    let sub_class = ask_text(prompter, "Enter character's subclass: ")?;
    let modifiers = ask_modifiers(prompter, &name)?;
    let proficiencies = ask_list(
        prompter,
        &format!("Enter {name}'s proficiencies (comma separated): "),
    )?;
    let saving_throws = ask_abilities(
        prompter,
        &format!("Enter {name}'s saving throw proficiencies (comma separated): "),
    )?;
    let actions = ask_actions(prompter, &name)?;
    let god = ask_text(prompter, &format!("Enter the god {name} worships: "))?;
    let bonus: Option<i32> = ask_optional_number(
        prompter,
        &format!("Enter {name}'s proficiency bonus (leave blank to use level): "),
        "proficiency bonus",
    )?;

    let mut character = Character::new(name, level)
        .with_race(race)
        .with_class(char_class, sub_class)
        .with_modifiers(modifiers)
        .with_proficiencies(proficiencies)
        .with_saving_throws(saving_throws)
        .with_actions(actions)
        .with_god(god);
    character.proficiency_bonus = bonus;
    Ok(character)
}

pub fn collect_god(prompter: &mut dyn Prompter, name: Option<String>) -> Result<God, EntryError> {
    let name = ask_name(prompter, name, "Enter god's name: ")?;
    let patronage = ask_list(prompter, "Enter god's patronage (comma separated): ")?;
    let symbols = ask_text(prompter, "Enter god's symbols: ")?;
    let followers = ask_list(prompter, "Enter notable followers (comma separated): ")?;
    let notes = ask_text(prompter, "Enter any additional notes: ")?;

    Ok(God::new(name)
        .with_patronage(patronage)
        .with_symbols(symbols)
        .with_followers(followers)
        .with_notes(notes))
}

pub fn collect_shop(prompter: &mut dyn Prompter, name: Option<String>) -> Result<Shop, EntryError> {
    let name = ask_name(prompter, name, "Enter shop's name: ")?;
    let town = ask_text(prompter, "Enter the town the shop is in: ")?;
    let shop_type = ask_text(prompter, "Enter the type of shop: ")?;
    let inventory = ask_prices(
        prompter,
        "Enter inventory as item:price in gold (comma separated): ",
        "inventory",
    )?;
    let notes = ask_text(prompter, "Enter any additional notes: ")?;

    Ok(Shop {
        name,
        town,
        shop_type,
        inventory,
        notes,
    })
}

pub fn collect_town(prompter: &mut dyn Prompter, name: Option<String>) -> Result<Town, EntryError> {
    let name = ask_name(prompter, name, "Enter town's name: ")?;
    let population = ask_number(prompter, "Enter the town's population: ", "population")?;
    let leader = ask_text(prompter, "Enter the town's leader: ")?;
    let guilds = ask_list(prompter, "Enter the town's guilds (comma separated): ")?;
    let notes = ask_text(prompter, "Enter any additional notes: ")?;

    Ok(Town {
        name,
        population,
        leader,
        guilds,
        notes,
    })
}

pub fn collect_shopkeep(
    prompter: &mut dyn Prompter,
    name: Option<String>,
) -> Result<Shopkeep, EntryError> {
    let name = ask_name(prompter, name, "Enter shopkeep's name: ")?;
    let race = ask_text(prompter, "Enter shopkeep's race: ")?;
    let shop = ask_text(prompter, "Enter the shop they run: ")?;
    let town = ask_text(prompter, "Enter the town they live in: ")?;
    let notes = ask_text(prompter, "Enter any additional notes: ")?;

    Ok(Shopkeep {
        name,
        race,
        shop,
        town,
        notes,
    })
}

pub fn collect_tavern(
    prompter: &mut dyn Prompter,
    name: Option<String>,
) -> Result<Tavern, EntryError> {
    let name = ask_name(prompter, name, "Enter tavern's name: ")?;
    let town = ask_text(prompter, "Enter the town the tavern is in: ")?;
    let wealth: Wealth = ask_text(
        prompter,
        "Enter the tavern's wealth (poor, modest, comfortable, wealthy, aristocratic): ",
    )?
    .parse()?;
    let owner = ask_text(prompter, "Enter the tavern's owner: ")?;
    let menu = ask_prices(
        prompter,
        "Enter the menu as item:price in gold (comma separated): ",
        "menu",
    )?;
    let accommodations = ask_prices(
        prompter,
        "Enter accommodations as room:price in gold (comma separated): ",
        "accommodations",
    )?;
    let notes = ask_text(prompter, "Enter any additional notes: ")?;

    Ok(Tavern {
        name,
        town,
        wealth,
        owner,
        menu,
        accommodations,
        notes,
    })
}

// ============================================================================
// Edits
// ============================================================================

/// Character attributes that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterField {
    Name,
    Race,
    CharClass,
    Level,
    SubClass,
    AbilityModifiers,
    Proficiencies,
    SavingThrows,
    Actions,
    God,
    ProficiencyBonus,
}

impl CharacterField {
    pub fn key(&self) -> &'static str {
        match self {
            CharacterField::Name => "name",
            CharacterField::Race => "race",
            CharacterField::CharClass => "char_class",
            CharacterField::Level => "level",
            CharacterField::SubClass => "sub_class",
            CharacterField::AbilityModifiers => "ability_modifiers",
            CharacterField::Proficiencies => "proficiencies",
            CharacterField::SavingThrows => "saving_throws",
            CharacterField::Actions => "actions",
            CharacterField::God => "god",
            CharacterField::ProficiencyBonus => "proficiency_bonus",
        }
    }

    pub fn all() -> [CharacterField; 11] {
        [
            CharacterField::Name,
            CharacterField::Race,
            CharacterField::CharClass,
            CharacterField::Level,
            CharacterField::SubClass,
            CharacterField::AbilityModifiers,
            CharacterField::Proficiencies,
            CharacterField::SavingThrows,
            CharacterField::Actions,
            CharacterField::God,
            CharacterField::ProficiencyBonus,
        ]
    }

    /// Comma separated list of every key, for the edit menu.
    pub fn menu() -> String {
        CharacterField::all()
            .iter()
            .map(|f| f.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for CharacterField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(' ', "_");
        match key.as_str() {
            "class" => Ok(CharacterField::CharClass),
            "subclass" => Ok(CharacterField::SubClass),
            _ => CharacterField::all()
                .into_iter()
                .find(|f| f.key() == key)
                .ok_or(()),
        }
    }
}

/// A validated change to one character attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterEdit {
    Name(String),
    Race(String),
    CharClass(String),
    Level(u8),
    SubClass(String),
    AbilityModifiers(AbilityModifiers),
    Proficiencies(Vec<String>),
    SavingThrows(Vec<Ability>),
    Actions(Actions),
    God(String),
    /// `None` returns the character to the level-derived bonus.
    ProficiencyBonus(Option<i32>),
}

impl CharacterEdit {
    /// Ask for the new value(s) of `field`.
    pub fn collect(field: CharacterField, prompter: &mut dyn Prompter) -> Result<Self, EntryError> {
        Ok(match field {
            CharacterField::Name => {
                CharacterEdit::Name(ask_name(prompter, None, "Enter new name: ")?)
            }
            CharacterField::Race => CharacterEdit::Race(ask_text(prompter, "Enter new race: ")?),
            CharacterField::CharClass => {
                CharacterEdit::CharClass(ask_text(prompter, "Enter new class: ")?)
            }
            CharacterField::Level => {
                CharacterEdit::Level(ask_number(prompter, "Enter new level: ", "level")?)
            }
            CharacterField::SubClass => {
                CharacterEdit::SubClass(ask_text(prompter, "Enter new subclass: ")?)
            }
            CharacterField::AbilityModifiers => {
                CharacterEdit::AbilityModifiers(ask_modifiers(prompter, "the character")?)
            }
            CharacterField::Proficiencies => CharacterEdit::Proficiencies(ask_list(
                prompter,
                "Enter new proficiencies (comma separated): ",
            )?),
            CharacterField::SavingThrows => CharacterEdit::SavingThrows(ask_abilities(
                prompter,
                "Enter new saving throw proficiencies (comma separated): ",
            )?),
            CharacterField::Actions => {
                CharacterEdit::Actions(ask_actions(prompter, "the character")?)
            }
            CharacterField::God => CharacterEdit::God(ask_text(prompter, "Enter new god: ")?),
            CharacterField::ProficiencyBonus => CharacterEdit::ProficiencyBonus(
                ask_optional_number(
                    prompter,
                    "Enter new proficiency bonus (leave blank to use level): ",
                    "proficiency bonus",
                )?,
            ),
        })
    }

    pub fn apply(self, character: &mut Character) {
        match self {
            CharacterEdit::Name(name) => character.name = name,
            CharacterEdit::Race(race) => character.race = race,
            CharacterEdit::CharClass(class) => character.char_class = class,
            CharacterEdit::Level(level) => character.level = level,
            CharacterEdit::SubClass(sub_class) => character.sub_class = sub_class,
            CharacterEdit::AbilityModifiers(modifiers) => character.ability_modifiers = modifiers,
            CharacterEdit::Proficiencies(proficiencies) => {
                character.set_proficiencies(proficiencies)
            }
            CharacterEdit::SavingThrows(saves) => character.set_saving_throws(saves),
            CharacterEdit::Actions(actions) => character.actions = actions,
            CharacterEdit::God(god) => character.god = god,
            CharacterEdit::ProficiencyBonus(bonus) => character.proficiency_bonus = bonus,
        }
    }
}

/// God attributes that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GodField {
    Name,
    Patronage,
    Symbols,
    NotableFollowers,
    Notes,
}

impl GodField {
    pub fn key(&self) -> &'static str {
        match self {
            GodField::Name => "name",
            GodField::Patronage => "patronage",
            GodField::Symbols => "symbols",
            GodField::NotableFollowers => "notable_followers",
            GodField::Notes => "notes",
        }
    }

    pub fn all() -> [GodField; 5] {
        [
            GodField::Name,
            GodField::Patronage,
            GodField::Symbols,
            GodField::NotableFollowers,
            GodField::Notes,
        ]
    }

    pub fn menu() -> String {
        GodField::all()
            .iter()
            .map(|f| f.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for GodField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(' ', "_");
        match key.as_str() {
            "followers" => Ok(GodField::NotableFollowers),
            _ => GodField::all()
                .into_iter()
                .find(|f| f.key() == key)
                .ok_or(()),
        }
    }
}

/// A validated change to one god attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GodEdit {
    Name(String),
    Patronage(Vec<String>),
    Symbols(String),
    NotableFollowers(Vec<String>),
    Notes(String),
}

impl GodEdit {
    pub fn collect(field: GodField, prompter: &mut dyn Prompter) -> Result<Self, EntryError> {
        Ok(match field {
            GodField::Name => GodEdit::Name(ask_name(prompter, None, "Enter new name: ")?),
            GodField::Patronage => GodEdit::Patronage(ask_list(
                prompter,
                "Enter new patronage (comma separated): ",
            )?),
            GodField::Symbols => GodEdit::Symbols(ask_text(prompter, "Enter new symbols: ")?),
            GodField::NotableFollowers => GodEdit::NotableFollowers(ask_list(
                prompter,
                "Enter new notable followers (comma separated): ",
            )?),
            GodField::Notes => GodEdit::Notes(ask_text(prompter, "Enter new notes: ")?),
        })
    }

    pub fn apply(self, god: &mut God) {
        match self {
            GodEdit::Name(name) => god.name = name,
            GodEdit::Patronage(patronage) => god.patronage = patronage,
            GodEdit::Symbols(symbols) => god.symbols = symbols,
            GodEdit::NotableFollowers(followers) => god.notable_followers = followers,
            GodEdit::Notes(notes) => god.notes = notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    fn spike_answers() -> Vec<&'static str> {
        vec![
            "Tiefling",
            "Bard",
            "3",
            "College of Lore",
            "-1",
            "2",
            "0",
            "1",
            "1",
            "4",
            "Persuasion, Deception, persuasion",
            "dexterity, charisma",
            "True",
            "0",
            "1",
            "Habit",
            "",
        ]
    }

    #[test]
    fn test_collect_character() {
        let mut answers = vec!["Spike"];
        answers.extend(spike_answers());
        let mut prompter = ScriptedPrompter::new(answers);

        let character = collect_character(&mut prompter, None).unwrap();
        assert_eq!(character.name, "Spike");
        assert_eq!(character.level, 3);
        assert_eq!(character.ability_modifiers.charisma, 4);
        assert_eq!(character.ability_modifiers.strength, -1);
        assert_eq!(character.proficiencies, vec!["persuasion", "deception"]);
        assert_eq!(
            character.saving_throws,
            vec![Ability::Dexterity, Ability::Charisma]
        );
        assert!(character.actions.bonus_actions);
        assert_eq!(character.god, "Habit");
        assert_eq!(character.proficiency_bonus, None);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_collect_character_with_preset_name() {
        let mut prompter = ScriptedPrompter::new(spike_answers());
        let character = collect_character(&mut prompter, Some("Spike".to_string())).unwrap();
        assert_eq!(character.name, "Spike");
        assert!(!prompter.asked().iter().any(|q| q.contains("name")));
    }

    #[test]
    fn test_bad_level_aborts_entry() {
        let mut prompter = ScriptedPrompter::new(["Spike", "Tiefling", "Bard", "three"]);
        let err = collect_character(&mut prompter, None).unwrap_err();
        assert!(matches!(
            err,
            EntryError::InvalidNumber { ref field, ref value } if field == "level" && value == "three"
        ));
        assert_eq!(err.to_string(), "invalid number for level: 'three'");
    }

    #[test]
    fn test_unknown_saving_throw_aborts_entry() {
        let mut answers = vec!["Spike"];
        answers.extend(spike_answers());
        answers[12] = "dexterity, luck";
        let mut prompter = ScriptedPrompter::new(answers);

        let err = collect_character(&mut prompter, None).unwrap_err();
        assert!(matches!(err, EntryError::UnknownAbility(_)));
    }

    #[test]
    fn test_bad_flag_aborts_entry() {
        let mut answers = vec!["Spike"];
        answers.extend(spike_answers());
        answers[13] = "maybe";
        let mut prompter = ScriptedPrompter::new(answers);

        let err = collect_character(&mut prompter, None).unwrap_err();
        assert!(matches!(err, EntryError::InvalidFlag { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut prompter = ScriptedPrompter::new(["   "]);
        assert!(matches!(
            collect_god(&mut prompter, None),
            Err(EntryError::EmptyName)
        ));
    }

    #[test]
    fn test_running_out_of_input_is_a_prompt_error() {
        let mut prompter = ScriptedPrompter::new(["Habit"]);
        assert!(matches!(
            collect_god(&mut prompter, None),
            Err(EntryError::Prompt(_))
        ));
    }

    #[test]
    fn test_collect_tavern_prices() {
        let mut prompter = ScriptedPrompter::new([
            "The Gilded Goose",
            "Riverside",
            "Wealthy",
            "Marta",
            "roast goose:2, wine: 0.5",
            "suite:4",
            "",
        ]);
        let tavern = collect_tavern(&mut prompter, None).unwrap();
        assert_eq!(tavern.wealth, Wealth::Wealthy);
        assert_eq!(tavern.menu.get("roast goose"), Some(&2.0));
        assert_eq!(tavern.menu.get("wine"), Some(&0.5));
        assert_eq!(tavern.accommodations.len(), 1);
    }

    #[test]
    fn test_bad_price_aborts_entry() {
        let mut prompter =
            ScriptedPrompter::new(["Ironmongers", "Riverside", "smithy", "rope:cheap"]);
        let err = collect_shop(&mut prompter, None).unwrap_err();
        assert!(matches!(err, EntryError::InvalidNumber { ref field, .. } if field == "inventory"));

        let mut prompter = ScriptedPrompter::new(["Ironmongers", "Riverside", "smithy", "rope"]);
        let err = collect_shop(&mut prompter, None).unwrap_err();
        assert!(matches!(err, EntryError::InvalidPrice { .. }));
    }

    #[test]
    fn test_non_finite_and_negative_prices_abort_entry() {
        for bad in ["ale:inf", "ale:NaN", "ale:-infinity", "ale:-2"] {
            let mut prompter =
                ScriptedPrompter::new(["The Goose", "Riverside", "modest", "Marta", bad]);
            let err = collect_tavern(&mut prompter, None).unwrap_err();
            assert!(
                matches!(err, EntryError::InvalidNumber { ref field, .. } if field == "menu"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_town_guilds_are_deduplicated() {
        let mut prompter = ScriptedPrompter::new([
            "Riverside",
            "1200",
            "Mayor Dunst",
            "Fishers, fishers, Boatwrights",
            "",
        ]);
        let town = collect_town(&mut prompter, None).unwrap();
        assert_eq!(town.guilds, vec!["Fishers", "Boatwrights"]);
    }

    #[test]
    fn test_field_names() {
        assert_eq!("char_class".parse(), Ok(CharacterField::CharClass));
        assert_eq!("Class".parse(), Ok(CharacterField::CharClass));
        assert_eq!("proficiency bonus".parse(), Ok(CharacterField::ProficiencyBonus));
        assert!("hit_points".parse::<CharacterField>().is_err());
        assert_eq!("followers".parse(), Ok(GodField::NotableFollowers));
        assert!(CharacterField::menu().starts_with("name, race, char_class"));
    }

    #[test]
    fn test_level_edit_keeps_explicit_bonus() {
        let mut character = Character::new("Spike", 3).with_proficiency_bonus(4);
        let mut prompter = ScriptedPrompter::new(["9"]);
        let edit = CharacterEdit::collect(CharacterField::Level, &mut prompter).unwrap();
        edit.apply(&mut character);

        assert_eq!(character.level, 9);
        assert_eq!(character.effective_proficiency_bonus(), 4);
    }

    #[test]
    fn test_clear_explicit_bonus() {
        let mut character = Character::new("Spike", 9).with_proficiency_bonus(2);
        let mut prompter = ScriptedPrompter::new([""]);
        CharacterEdit::collect(CharacterField::ProficiencyBonus, &mut prompter)
            .unwrap()
            .apply(&mut character);

        assert_eq!(character.proficiency_bonus, None);
        assert_eq!(character.effective_proficiency_bonus(), 4);
    }

    #[test]
    fn test_god_edit() {
        let mut god = God::new("Habit").with_patronage(["greed"]);
        let mut prompter = ScriptedPrompter::new(["greed, trade"]);
        GodEdit::collect(GodField::Patronage, &mut prompter)
            .unwrap()
            .apply(&mut god);
        assert!(god.is_patron_of("trade"));
    }
}
