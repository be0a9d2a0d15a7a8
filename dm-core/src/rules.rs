//! Stat resolution.
//!
//! Turns a free-text stat name ("persuasion", "Wisdom", "sleight of hand")
//! into a character's effective modifier. Abilities double as saving
//! throws: a proficient save adds the proficiency bonus to the raw
//! ability modifier. Skills add the bonus when the character lists the
//! skill among their proficiencies.

use crate::world::{Ability, Character, Skill};

/// A stat a character can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Ability(Ability),
    Skill(Skill),
}

impl Stat {
    /// Parse a stat name, ignoring case. Abilities take precedence.
    pub fn parse(name: &str) -> Option<Stat> {
        if let Ok(ability) = name.parse::<Ability>() {
            return Some(Stat::Ability(ability));
        }
        Skill::from_name(name).map(Stat::Skill)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Ability(ability) => ability.name(),
            Stat::Skill(skill) => skill.name(),
        }
    }
}

/// Resolve `stat` for `character`.
///
/// Returns `None` when the name is neither an ability nor a cataloged
/// skill; no character has such a stat.
pub fn resolve(character: &Character, stat: &str) -> Option<i32> {
    match Stat::parse(stat)? {
        Stat::Ability(ability) => Some(character.saving_throw_modifier(ability)),
        Stat::Skill(skill) => Some(character.skill_modifier(skill)),
    }
}

/// The character with the highest value for `stat`.
///
/// Ties go to whoever comes first. Characters the stat does not apply to
/// are skipped.
pub fn best_for<'a>(characters: &'a [Character], stat: &str) -> Option<(&'a Character, i32)> {
    let mut best: Option<(&Character, i32)> = None;
    for character in characters {
        let Some(value) = resolve(character, stat) else {
            continue;
        };
        match best {
            Some((_, top)) if top >= value => {}
            _ => best = Some((character, value)),
        }
    }
    best
}

/// One row of a stat sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub stat: Stat,
    pub value: i32,
    pub proficient: bool,
}

/// Every ability (as a saving throw) and every skill for one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSheet {
    pub name: String,
    pub proficiency_bonus: i32,
    pub abilities: Vec<StatLine>,
    pub skills: Vec<StatLine>,
}

impl StatSheet {
    pub fn for_character(character: &Character) -> Self {
        let abilities = Ability::all()
            .into_iter()
            .map(|ability| StatLine {
                stat: Stat::Ability(ability),
                value: character.saving_throw_modifier(ability),
                proficient: character.has_saving_throw(ability),
            })
            .collect();
        let skills = Skill::all()
            .into_iter()
            .map(|skill| StatLine {
                stat: Stat::Skill(skill),
                value: character.skill_modifier(skill),
                proficient: character.is_proficient(&skill.key()),
            })
            .collect();

        Self {
            name: character.name.clone(),
            proficiency_bonus: character.effective_proficiency_bonus(),
            abilities,
            skills,
        }
    }

    /// Render one line per stat. Proficient stats are starred.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} (proficiency bonus {:+})",
            self.name, self.proficiency_bonus
        )];
        lines.extend(self.abilities.iter().chain(&self.skills).map(|line| {
            let marker = if line.proficient { "*" } else { " " };
            format!("{marker} {:<18} {:+}", line.stat.name(), line.value)
        }));
        lines
    }
}
