//! Command interpreter.
//!
//! A line of input is split on whitespace and offered to an ordered table
//! of rules. Each rule either recognises the line and returns a
//! [`Command`], or passes. The first rule to recognise a line wins, so an
//! input that fits several shapes ("habit followers" could also be a
//! two-word stat lookup) is decided purely by rule order:
//!
//! 1. `reserved`: the whole line is `quit` or `help`
//! 2. `check`: the line contains "check", as in `<stat> check`
//! 3. `suffix`: the last word is worship, followers, shops, taverns, info
//!    or st and the words before it name a subject other than "all"
//! 4. `prefix`: the first two words are `god search`, `god of`,
//!    `add <kind>` or `edit character|god`
//! 5. `literal`: bruh, all worships, all shops, all towns, all taverns
//! 6. `stat`: exactly two words, `<name|all> <stat>`
//!
//! Anything else is an unknown command.

use crate::entry::{
    self, CharacterEdit, CharacterField, EntryError, GodEdit, GodField, Prompter,
};
use crate::persist::{Entity, EntityKind, PersistError, Repository};
use crate::rules::{self, StatSheet};
use crate::world::{names_match, Character, God, Shop, Shopkeep, Tavern, Town, Wealth};
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

pub const HELP_TEXT: &str = "\
Available commands:
- <skill> check: Find the best character for a skill or ability (e.g., perception check).
- all worships: List every character and the god they worship.
- <character> worship: Show which god a character worships (e.g., Spike worship).
- god search [<god name>]: Show a god (e.g., god search Habit), or list every god.
- god of <aspect>: Find the god whose patronage includes an aspect (e.g., god of greed).
- <god> followers: List the characters who worship a god (e.g., Habit followers).
- <name> info: Show any character, god, town, shop, shopkeep or tavern (e.g., Spike info).
- <character> st: Show a character's full stat sheet (e.g., Spike st).
- <character> <skill/ability>: Show one modifier (e.g., Spike perception).
- all <skill/ability>: Show one modifier for every character (e.g., all perception).
- <town> shops: List the shops in a town.
- <town> [<wealth>] taverns: List the taverns in a town, optionally by wealth.
- all shops / all towns / all taverns: List every shop, town or tavern.
- add character / add god / add shop / add town / add shopkeep / add tavern
- edit character / edit god
- help: Show this message.
- quit: Exit.";

const CHECK_USAGE: &str = "Please specify the skill to check (e.g., perception check).";
const GOD_OF_USAGE: &str = "Please specify the aspect to search for (e.g., god of greed).";

/// Who a two-word stat lookup is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    All,
    Named(String),
}

/// A recognised command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Usage(&'static str),
    BestFor { stat: String },
    Worship { character: String },
    Followers { god: String },
    TownShops { town: String },
    TownTaverns { town: String, wealth: Option<Wealth> },
    Info { name: String },
    StatSheet { character: String },
    GodSearch { name: Option<String> },
    GodOf { aspect: String },
    Add { kind: EntityKind, name: Option<String> },
    EditCharacter { name: Option<String> },
    EditGod { name: Option<String> },
    Bruh,
    AllWorships,
    AllShops,
    AllTowns,
    AllTaverns,
    Stat { subject: Subject, stat: String },
    Unknown,
}

/// One input line split into words.
///
/// Matching uses the lower-cased words; names are rebuilt from the words
/// as typed.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: Vec<&'a str>,
    lower: Vec<String>,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        let lower = words.iter().map(|w| w.to_lowercase()).collect();
        Self { words, lower }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn lower(&self, index: usize) -> Option<&str> {
        self.lower.get(index).map(String::as_str)
    }

    fn last(&self) -> Option<&str> {
        self.lower.last().map(String::as_str)
    }

    /// The whole line, lower-cased, single spaced.
    fn line(&self) -> String {
        self.lower.join(" ")
    }

    /// Words `start..end` as typed, single spaced.
    fn join(&self, start: usize, end: usize) -> String {
        self.words[start..end].join(" ")
    }

    /// Words from `start` to the end, or `None` when there are none.
    fn rest(&self, start: usize) -> Option<String> {
        (start < self.len()).then(|| self.join(start, self.len()))
    }
}

/// A named entry in the dispatch table.
pub struct Rule {
    pub name: &'static str,
    pub parse: fn(&Tokens<'_>) -> Option<Command>,
}

/// The dispatch table, highest priority first.
pub const RULES: &[Rule] = &[
    Rule {
        name: "reserved",
        parse: reserved_word,
    },
    Rule {
        name: "check",
        parse: check,
    },
    Rule {
        name: "suffix",
        parse: suffix_keyword,
    },
    Rule {
        name: "prefix",
        parse: prefix_keyword,
    },
    Rule {
        name: "literal",
        parse: literal_line,
    },
    Rule {
        name: "stat",
        parse: subject_stat,
    },
];

/// Parse one line of input into a command.
pub fn parse(line: &str) -> Command {
    let tokens = Tokens::new(line);
    for rule in RULES {
        if let Some(command) = (rule.parse)(&tokens) {
            debug!(rule = rule.name, ?command, "matched");
            return command;
        }
    }
    Command::Unknown
}

fn reserved_word(tokens: &Tokens<'_>) -> Option<Command> {
    match tokens.line().as_str() {
        "quit" => Some(Command::Quit),
        "help" => Some(Command::Help),
        _ => None,
    }
}

fn check(tokens: &Tokens<'_>) -> Option<Command> {
    if !tokens.line().contains("check") {
        return None;
    }
    if tokens.len() < 2 {
        return Some(Command::Usage(CHECK_USAGE));
    }
    Some(Command::BestFor {
        stat: tokens.join(0, tokens.len() - 1).to_lowercase(),
    })
}

fn suffix_keyword(tokens: &Tokens<'_>) -> Option<Command> {
    if tokens.len() < 2 {
        return None;
    }
    let end = tokens.len() - 1;
    let keyword = tokens.last()?;

    // `<town> <wealth> taverns` consumes the wealth word as well.
    let (subject_end, wealth) = match (keyword, end >= 2) {
        ("taverns", true) => match tokens.lower(end - 1).map(str::parse::<Wealth>) {
            Some(Ok(wealth)) => (end - 1, Some(wealth)),
            _ => (end, None),
        },
        _ => (end, None),
    };

    let subject = tokens.join(0, subject_end);
    if names_match(&subject, "all") {
        return None;
    }

    match keyword {
        "worship" => Some(Command::Worship { character: subject }),
        "followers" => Some(Command::Followers { god: subject }),
        "shops" => Some(Command::TownShops { town: subject }),
        "taverns" => Some(Command::TownTaverns {
            town: subject,
            wealth,
        }),
        "info" => Some(Command::Info { name: subject }),
        "st" => Some(Command::StatSheet { character: subject }),
        _ => None,
    }
}

fn prefix_keyword(tokens: &Tokens<'_>) -> Option<Command> {
    match (tokens.lower(0)?, tokens.lower(1)?) {
        ("god", "search") => Some(Command::GodSearch {
            name: tokens.rest(2),
        }),
        ("god", "of") => Some(match tokens.rest(2) {
            Some(aspect) => Command::GodOf { aspect },
            None => Command::Usage(GOD_OF_USAGE),
        }),
        ("add", kind) => EntityKind::from_label(kind).map(|kind| Command::Add {
            kind,
            name: tokens.rest(2),
        }),
        ("edit", "character") => Some(Command::EditCharacter {
            name: tokens.rest(2),
        }),
        ("edit", "god") => Some(Command::EditGod {
            name: tokens.rest(2),
        }),
        _ => None,
    }
}

fn literal_line(tokens: &Tokens<'_>) -> Option<Command> {
    match tokens.line().as_str() {
        "bruh" => Some(Command::Bruh),
        "all worships" => Some(Command::AllWorships),
        "all shops" => Some(Command::AllShops),
        "all towns" => Some(Command::AllTowns),
        "all taverns" => Some(Command::AllTaverns),
        _ => None,
    }
}

fn subject_stat(tokens: &Tokens<'_>) -> Option<Command> {
    if tokens.len() != 2 {
        return None;
    }
    let subject = if tokens.lower(0)? == "all" {
        Subject::All
    } else {
        Subject::Named(tokens.join(0, 1))
    };
    Some(Command::Stat {
        subject,
        stat: tokens.lower(1)?.to_string(),
    })
}

/// Errors that end a command without a reply.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("failed to save campaign data: {0}")]
    Persist(#[from] PersistError),

    #[error("failed to read input: {0}")]
    Prompt(#[from] io::Error),
}

/// The interpreter's answer to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub continue_session: bool,
}

impl Reply {
    pub fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            continue_session: true,
        }
    }

    pub fn quit() -> Self {
        Self {
            lines: vec!["Goodbye!".to_string()],
            continue_session: false,
        }
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Separate fatal input failures from mistakes worth reporting.
fn recoverable<T>(result: Result<T, EntryError>) -> Result<Result<T, EntryError>, InterpretError> {
    match result {
        Err(EntryError::Prompt(err)) => Err(InterpretError::Prompt(err)),
        other => Ok(other),
    }
}

fn entry_failed(kind: EntityKind, err: EntryError) -> Reply {
    warn!(%kind, error = %err, "entry abandoned");
    Reply::line(format!("Error: {err}. Please try again."))
}

/// "Perception" from "perception".
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn display_blocks<T: Entity>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.display_info()).collect()
}

/// Answers queries against a campaign and applies add/edit commands.
pub struct Interpreter<P: Prompter> {
    repo: Repository,
    prompter: P,
}

impl<P: Prompter> Interpreter<P> {
    pub fn new(repo: Repository, prompter: P) -> Self {
        Self { repo, prompter }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    /// Interpret one line of input.
    pub async fn interpret(&mut self, line: &str) -> Result<Reply, InterpretError> {
        let command = parse(line);
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, InterpretError> {
        let reply = match command {
            Command::Quit => Reply::quit(),
            Command::Help => Reply::line(HELP_TEXT),
            Command::Usage(usage) => Reply::line(usage),
            Command::BestFor { stat } => self.best_for(&stat),
            Command::Worship { character } => self.worship(&character),
            Command::Followers { god } => self.followers(&god),
            Command::TownShops { town } => self.town_shops(&town),
            Command::TownTaverns { town, wealth } => self.town_taverns(&town, wealth),
            Command::Info { name } => self.info(&name),
            Command::StatSheet { character } => self.stat_sheet(&character),
            Command::GodSearch { name } => self.god_search(name.as_deref()),
            Command::GodOf { aspect } => self.god_of(&aspect),
            Command::Add { kind, name } => return self.add(kind, name).await,
            Command::EditCharacter { name } => return self.edit_character(name).await,
            Command::EditGod { name } => return self.edit_god(name).await,
            Command::Bruh => Reply::line("bruh."),
            Command::AllWorships => self.all_worships(),
            Command::AllShops => self.list_all::<Shop>("No shops recorded."),
            Command::AllTowns => self.list_all::<Town>("No towns recorded."),
            Command::AllTaverns => self.list_all::<Tavern>("No taverns recorded."),
            Command::Stat { subject, stat } => self.stat(&subject, &stat),
            Command::Unknown => Reply::line("Unknown command. Please try again."),
        };
        Ok(reply)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    fn best_for(&self, stat: &str) -> Reply {
        match rules::best_for(&self.repo.characters, stat) {
            Some((character, value)) => Reply::line(format!(
                "The best character for {stat} is {} with a {stat} modifier of {value}.",
                character.name
            )),
            None => Reply::line(format!("No character has a stat for {stat}.")),
        }
    }

    fn worship(&self, name: &str) -> Reply {
        match self.repo.find::<Character>(name) {
            Some(character) => Reply::line(format!("{} worships {}.", character.name, character.god)),
            None => Reply::line(format!("No character named {name} found.")),
        }
    }

    fn all_worships(&self) -> Reply {
        if self.repo.characters.is_empty() {
            return Reply::line("No characters recorded.");
        }
        Reply::lines(
            self.repo
                .characters
                .iter()
                .map(|c| format!("{} worships {}.", c.name, c.god))
                .collect(),
        )
    }

    fn followers(&self, god_name: &str) -> Reply {
        let god = self.repo.find::<God>(god_name);
        let display_name = god.map_or(god_name, |g| g.name.as_str());
        let worshippers: Vec<&str> = self
            .repo
            .characters
            .iter()
            .filter(|c| names_match(&c.god, god_name))
            .map(|c| c.name.as_str())
            .collect();

        let mut lines = Vec::new();
        if !worshippers.is_empty() {
            lines.push(format!(
                "Characters who worship {display_name}: {}",
                worshippers.join(", ")
            ));
        }
        if let Some(god) = god.filter(|g| !g.notable_followers.is_empty()) {
            lines.push(format!(
                "Notable followers of {}: {}",
                god.name,
                god.notable_followers.join(", ")
            ));
        }
        if lines.is_empty() {
            lines.push(format!("No characters worship {god_name}."));
        }
        Reply::lines(lines)
    }

    fn town_shops(&self, town: &str) -> Reply {
        let shops: Vec<&Shop> = self
            .repo
            .shops
            .iter()
            .filter(|s| names_match(&s.town, town))
            .collect();
        if shops.is_empty() {
            return Reply::line(format!("No shops found in {town}."));
        }
        Reply::lines(display_blocks(&shops))
    }

    fn town_taverns(&self, town: &str, wealth: Option<Wealth>) -> Reply {
        let taverns: Vec<&Tavern> = self
            .repo
            .taverns
            .iter()
            .filter(|t| names_match(&t.town, town))
            .filter(|t| wealth.map_or(true, |w| t.wealth == w))
            .collect();
        if taverns.is_empty() {
            return Reply::line(match wealth {
                Some(wealth) => format!("No {wealth} taverns found in {town}."),
                None => format!("No taverns found in {town}."),
            });
        }
        Reply::lines(display_blocks(&taverns))
    }

    fn info(&self, name: &str) -> Reply {
        let repo = &self.repo;
        let found = repo
            .find::<Character>(name)
            .map(Entity::display_info)
            .or_else(|| repo.find::<God>(name).map(Entity::display_info))
            .or_else(|| repo.find::<Town>(name).map(Entity::display_info))
            .or_else(|| repo.find::<Shop>(name).map(Entity::display_info))
            .or_else(|| repo.find::<Shopkeep>(name).map(Entity::display_info))
            .or_else(|| repo.find::<Tavern>(name).map(Entity::display_info));
        match found {
            Some(info) => Reply::line(info),
            None => Reply::line(format!("No match found for {name}.")),
        }
    }

    fn stat_sheet(&self, name: &str) -> Reply {
        match self.repo.find::<Character>(name) {
            Some(character) => Reply::lines(StatSheet::for_character(character).lines()),
            None => Reply::line(format!("No character named {name} found.")),
        }
    }

    fn god_search(&self, name: Option<&str>) -> Reply {
        match name {
            Some(name) => match self.repo.find::<God>(name) {
                Some(god) => Reply::line(god.display_info()),
                None => Reply::line(format!("No god named {name} found.")),
            },
            None if self.repo.gods.is_empty() => Reply::line("No gods recorded."),
            None => Reply::lines(self.repo.gods.iter().map(|g| g.name.clone()).collect()),
        }
    }

    fn god_of(&self, aspect: &str) -> Reply {
        match self.repo.gods.iter().find(|g| g.is_patron_of(aspect)) {
            Some(god) => Reply::line(format!("The god of {aspect} is {}.", god.name)),
            None => Reply::line(format!("No god found for the patronage of {aspect}.")),
        }
    }

    fn list_all<T: Entity>(&self, empty: &str) -> Reply {
        let items: Vec<&T> = self.repo.all::<T>().iter().collect();
        if items.is_empty() {
            return Reply::line(empty);
        }
        Reply::lines(display_blocks(&items))
    }

    fn stat_line(character: &Character, stat: &str) -> String {
        match rules::resolve(character, stat) {
            Some(value) => format!("{}'s {}: {value}", character.name, capitalize(stat)),
            None => format!(
                "{} does not have a {} stat.",
                character.name,
                capitalize(stat)
            ),
        }
    }

    fn stat(&self, subject: &Subject, stat: &str) -> Reply {
        match subject {
            Subject::All if self.repo.characters.is_empty() => {
                Reply::line("No characters recorded.")
            }
            Subject::All => Reply::lines(
                self.repo
                    .characters
                    .iter()
                    .map(|c| Self::stat_line(c, stat))
                    .collect(),
            ),
            Subject::Named(name) => match self.repo.find::<Character>(name) {
                Some(character) => Reply::line(Self::stat_line(character, stat)),
                None => Reply::line(format!("No character named {name} found.")),
            },
        }
    }

    // ========================================================================
    // Add / Edit
    // ========================================================================

    fn ask(&mut self, question: &str) -> Result<String, InterpretError> {
        Ok(self.prompter.ask(question)?.trim().to_string())
    }

    async fn add(&mut self, kind: EntityKind, name: Option<String>) -> Result<Reply, InterpretError> {
        match kind {
            EntityKind::Character => self.add_entity(entry::collect_character, name).await,
            EntityKind::God => self.add_entity(entry::collect_god, name).await,
            EntityKind::Shop => self.add_entity(entry::collect_shop, name).await,
            EntityKind::Town => self.add_entity(entry::collect_town, name).await,
            EntityKind::Shopkeep => self.add_entity(entry::collect_shopkeep, name).await,
            EntityKind::Tavern => self.add_entity(entry::collect_tavern, name).await,
        }
    }

    async fn add_entity<T: Entity>(
        &mut self,
        collect: fn(&mut dyn Prompter, Option<String>) -> Result<T, EntryError>,
        name: Option<String>,
    ) -> Result<Reply, InterpretError> {
        let duplicate = |name: &str| {
            Reply::line(format!("A {} named {name} already exists.", T::KIND))
        };

        if let Some(name) = name.as_deref().filter(|n| self.repo.contains::<T>(n)) {
            return Ok(duplicate(name));
        }
        let entity = match recoverable(collect(&mut self.prompter, name))? {
            Ok(entity) => entity,
            Err(err) => return Ok(entry_failed(T::KIND, err)),
        };
        if self.repo.contains::<T>(entity.name()) {
            return Ok(duplicate(entity.name()));
        }

        let name = entity.name().to_string();
        self.repo.insert(entity).await?;
        debug!(kind = %T::KIND, %name, "added");
        Ok(Reply::line(format!("{name} has been added successfully.")))
    }

    async fn edit_character(&mut self, name: Option<String>) -> Result<Reply, InterpretError> {
        let name = match name {
            Some(name) => name,
            None => self.ask("Enter the name of the character to edit: ")?,
        };
        let Some(current) = self.repo.find::<Character>(&name).map(|c| c.name.clone()) else {
            return Ok(Reply::line(format!("No character named {name} found.")));
        };

        let attribute = self.ask(&format!(
            "Editing {current}. Enter the attribute you want to edit ({}): ",
            CharacterField::menu()
        ))?;
        let Ok(field) = attribute.parse::<CharacterField>() else {
            return Ok(Reply::line("Invalid attribute."));
        };
        let edit = match recoverable(CharacterEdit::collect(field, &mut self.prompter))? {
            Ok(edit) => edit,
            Err(err) => return Ok(entry_failed(EntityKind::Character, err)),
        };
        if let CharacterEdit::Name(new_name) = &edit {
            if !names_match(new_name, &current) && self.repo.contains::<Character>(new_name) {
                return Ok(Reply::line(format!(
                    "A character named {new_name} already exists."
                )));
            }
        }

        let Some(character) = self.repo.find_mut::<Character>(&current) else {
            return Ok(Reply::line(format!("No character named {name} found.")));
        };
        edit.apply(character);
        let updated = character.name.clone();
        self.repo.persist::<Character>().await?;
        debug!(character = %updated, field = field.key(), "edited");
        Ok(Reply::line(format!(
            "{updated}'s details have been updated successfully."
        )))
    }

    async fn edit_god(&mut self, name: Option<String>) -> Result<Reply, InterpretError> {
        let name = match name {
            Some(name) => name,
            None => self.ask("Enter the name of the god to edit: ")?,
        };
        let Some(current) = self.repo.find::<God>(&name).map(|g| g.name.clone()) else {
            return Ok(Reply::line(format!("No god named {name} found.")));
        };

        let attribute = self.ask(&format!(
            "Editing {current}. Enter the attribute you want to edit ({}): ",
            GodField::menu()
        ))?;
        let Ok(field) = attribute.parse::<GodField>() else {
            return Ok(Reply::line("Invalid attribute."));
        };
        let edit = match recoverable(GodEdit::collect(field, &mut self.prompter))? {
            Ok(edit) => edit,
            Err(err) => return Ok(entry_failed(EntityKind::God, err)),
        };
        if let GodEdit::Name(new_name) = &edit {
            if !names_match(new_name, &current) && self.repo.contains::<God>(new_name) {
                return Ok(Reply::line(format!("A god named {new_name} already exists.")));
            }
        }

        let Some(god) = self.repo.find_mut::<God>(&current) else {
            return Ok(Reply::line(format!("No god named {name} found.")));
        };
        edit.apply(god);
        let updated = god.name.clone();
        self.repo.persist::<God>().await?;
        debug!(god = %updated, field = field.key(), "edited");
        Ok(Reply::line(format!(
            "{updated}'s details have been updated successfully."
        )))
    }
}
