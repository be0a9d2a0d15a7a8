//! Testing utilities.
//!
//! - `ScriptedPrompter` answers interactive questions from a fixed script
//! - Sample records and a sample campaign for scenario tests

use crate::config::StorageConfig;
use crate::entry::Prompter;
use crate::persist::Repository;
use crate::world::{
    Ability, AbilityModifiers, Actions, Character, God, Shop, Shopkeep, Tavern, Town, Wealth,
};
use std::collections::VecDeque;
use std::io;

/// A prompter that replays scripted answers in order.
///
/// Running out of answers is reported as an unexpected end of input, the
/// same way a closed stdin would be.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Queue another answer.
    pub fn push(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}

/// Level 3 bard: charisma +4, wisdom +1, proficient in persuasion.
pub fn sample_spike() -> Character {
    Character::new("Spike", 3)
        .with_race("Tiefling")
        .with_class("Bard", "College of Lore")
        .with_modifiers(AbilityModifiers::new(-1, 2, 0, 1, 1, 4))
        .with_proficiencies(["persuasion", "deception", "performance"])
        .with_saving_throws([Ability::Dexterity, Ability::Charisma])
        .with_actions(Actions {
            bonus_actions: true,
            extra_attacks: 0,
            actions: 1,
        })
        .with_god("Habit")
}

/// Level 5 ranger with perception +4 from an explicit bonus of 2.
pub fn sample_vex() -> Character {
    Character::new("Vex", 5)
        .with_race("Half-Elf")
        .with_class("Ranger", "Gloom Stalker")
        .with_modifiers(AbilityModifiers::new(0, 3, 1, 0, 2, 0))
        .with_proficiencies(["perception", "stealth", "survival"])
        .with_saving_throws([Ability::Strength, Ability::Dexterity])
        .with_actions(Actions {
            bonus_actions: true,
            extra_attacks: 1,
            actions: 1,
        })
        .with_god("Sehanine")
        .with_proficiency_bonus(2)
}

pub fn sample_habit() -> God {
    God::new("Habit")
        .with_patronage(["Greed", "Trade"])
        .with_symbols("A closed fist around a coin")
        .with_followers(["Spike", "Merchant Prince Olo"])
        .with_notes("Worshipped in market towns.")
}

pub fn sample_sehanine() -> God {
    God::new("Sehanine")
        .with_patronage(["Moon", "Dreams"])
        .with_symbols("A crescent moon")
        .with_notes("Patron of elves and wanderers.")
}

/// A small campaign: two characters, two gods and the town of Riverside.
pub fn sample_repository(config: StorageConfig) -> Repository {
    let mut repo = Repository::empty(config);
    repo.characters = vec![sample_spike(), sample_vex()];
    repo.gods = vec![sample_habit(), sample_sehanine()];
    repo.towns = vec![Town {
        name: "Riverside".to_string(),
        population: 1200,
        leader: "Mayor Dunst".to_string(),
        guilds: vec!["Fishers".to_string(), "Boatwrights".to_string()],
        notes: "Built where two rivers meet.".to_string(),
    }];

    let mut ironmongers = Shop::new("Ironmongers", "Riverside");
    ironmongers.shop_type = "Smithy".to_string();
    ironmongers.inventory.insert("Rope".to_string(), 1.0);
    ironmongers.inventory.insert("Longsword".to_string(), 15.0);
    let herbalist = Shop::new("Green Thumb", "Riverside");
    let distant = Shop::new("Salt and Sail", "Port Ember");
    repo.shops = vec![ironmongers, herbalist, distant];

    repo.shopkeeps = vec![Shopkeep {
        name: "Brannoc".to_string(),
        race: "Dwarf".to_string(),
        shop: "Ironmongers".to_string(),
        town: "Riverside".to_string(),
        notes: "Gruff but fair.".to_string(),
    }];

    let mut goose = Tavern::new("The Gilded Goose", "Riverside", Wealth::Wealthy);
    goose.menu.insert("Roast goose".to_string(), 2.0);
    goose.accommodations.insert("Suite".to_string(), 4.0);
    repo.taverns = vec![
        goose,
        Tavern::new("The Leaky Bucket", "Riverside", Wealth::Poor),
        Tavern::new("The Anchor", "Port Ember", Wealth::Modest),
    ];
    repo
}
