//! Add and edit flows, including what ends up on disk.
//!
//! Answers to interactive questions are scripted up front with a
//! `ScriptedPrompter`; each test gets its own data directory.
//!
//! Run with: `cargo test -p dm-core --test entries`

use dm_core::commands::{InterpretError, Interpreter, Reply};
use dm_core::config::StorageConfig;
use dm_core::persist::{EntityKind, Repository};
use dm_core::testing::{sample_repository, ScriptedPrompter};
use dm_core::world::{Character, God, Tavern, Wealth};
use tempfile::TempDir;

fn campaign(temp_dir: &TempDir) -> Interpreter<ScriptedPrompter> {
    let repo = sample_repository(StorageConfig::new(temp_dir.path()));
    Interpreter::new(repo, ScriptedPrompter::default())
}

async fn run<I, S>(dm: &mut Interpreter<ScriptedPrompter>, line: &str, answers: I) -> Reply
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for answer in answers {
        dm.prompter_mut().push(answer);
    }
    dm.interpret(line).await.expect("Command should not fail")
}

/// Answers for a new character after the name prompt.
fn thorin_answers() -> Vec<&'static str> {
    vec![
        "Dwarf",
        "Fighter",
        "5",
        "Champion",
        "3",
        "1",
        "2",
        "0",
        "1",
        "-1",
        "athletics, intimidation",
        "strength, constitution",
        "no",
        "1",
        "1",
        "Moradin",
        "",
    ]
}

// =============================================================================
// Adding records
// =============================================================================

#[tokio::test]
async fn test_add_character_saves_and_reloads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    let mut answers = vec!["Thorin"];
    answers.extend(thorin_answers());
    let reply = run(&mut dm, "add character", answers).await;
    assert_eq!(reply.text(), "Thorin has been added successfully.");
    assert_eq!(dm.prompter().remaining(), 0);

    // The whole collection is rewritten, not just the new record.
    let reloaded = Repository::load(config.clone())
        .await
        .expect("Load should succeed");
    assert_eq!(reloaded.characters.len(), 3);
    let thorin = reloaded
        .find::<Character>("thorin")
        .expect("Thorin should be saved");
    assert_eq!(thorin.level, 5);
    assert_eq!(thorin.effective_proficiency_bonus(), 3);
    assert!(!config.path_for(EntityKind::God).exists());

    // Level 5 fighter: strength 3 + bonus 3.
    let reply = run(&mut dm, "athletics check", Vec::<String>::new()).await;
    assert_eq!(
        reply.text(),
        "The best character for athletics is Thorin with a athletics modifier of 6."
    );
}

#[tokio::test]
async fn test_add_with_name_in_command_skips_name_prompt() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "add character Thorin Oakenshield", thorin_answers()).await;
    assert_eq!(reply.text(), "Thorin Oakenshield has been added successfully.");
    assert!(dm.prompter().asked()[0].contains("race"));
}

#[tokio::test]
async fn test_invalid_level_aborts_add() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    let reply = run(
        &mut dm,
        "add character",
        ["Thorin", "Dwarf", "Fighter", "three"],
    )
    .await;
    assert_eq!(
        reply.text(),
        "Error: invalid number for level: 'three'. Please try again."
    );
    assert!(dm.repository().find::<Character>("Thorin").is_none());
    assert!(!config.path_for(EntityKind::Character).exists());
}

#[tokio::test]
async fn test_duplicate_names_are_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    // Named in the command: rejected before any question.
    let reply = run(&mut dm, "add god HABIT", Vec::<String>::new()).await;
    assert_eq!(reply.text(), "A god named HABIT already exists.");
    assert!(dm.prompter().asked().is_empty());

    // Named at the prompt: rejected once the entry is complete.
    let reply = run(
        &mut dm,
        "add god",
        ["habit", "luck", "a coin", "", "Another one"],
    )
    .await;
    assert_eq!(reply.text(), "A god named habit already exists.");
    assert_eq!(dm.repository().gods.len(), 2);
    assert!(!config.path_for(EntityKind::God).exists());
}

#[tokio::test]
async fn test_add_tavern_then_query_by_wealth() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    let reply = run(
        &mut dm,
        "add tavern The Rusty Nail",
        ["Riverside", "Comfortable", "Old Ned", "ale:0.1, stew:0.5", "", "Loud."],
    )
    .await;
    assert_eq!(reply.text(), "The Rusty Nail has been added successfully.");

    let reply = run(&mut dm, "riverside comfortable taverns", Vec::<String>::new()).await;
    assert_eq!(reply.lines.len(), 1);
    assert!(reply.lines[0].contains("Menu: ale: 0.1 gp, stew: 0.5 gp"));

    let json = std::fs::read_to_string(config.path_for(EntityKind::Tavern))
        .expect("Taverns should be saved");
    assert!(json.contains("\"wealth\": \"comfortable\""));
    let saved: Vec<Tavern> = serde_json::from_str(&json).expect("Saved taverns should parse");
    assert_eq!(saved.len(), 4);
    assert_eq!(saved[3].wealth, Wealth::Comfortable);
}

#[tokio::test]
async fn test_unknown_wealth_aborts_add() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "add tavern The Rusty Nail", ["Riverside", "filthy"]).await;
    assert!(reply.text().starts_with("Error: 'filthy' is not a wealth level"));
    assert_eq!(dm.repository().taverns.len(), 3);
}

#[tokio::test]
async fn test_non_finite_price_aborts_add_and_campaign_still_loads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    for menu in ["ale:inf", "ale:nan"] {
        let reply = run(
            &mut dm,
            "add tavern The Goose",
            ["Riverside", "modest", "Marta", menu],
        )
        .await;
        assert!(
            reply.text().starts_with("Error: invalid number for menu"),
            "{menu}: {}",
            reply.text()
        );
    }
    assert!(dm.repository().find::<Tavern>("The Goose").is_none());
    assert!(!config.path_for(EntityKind::Tavern).exists());

    // A finite price goes through and the saved file loads back.
    let reply = run(
        &mut dm,
        "add tavern The Goose",
        ["Riverside", "modest", "Marta", "ale:0.2", "", ""],
    )
    .await;
    assert_eq!(reply.text(), "The Goose has been added successfully.");
    let reloaded = Repository::load(config).await.expect("Load should succeed");
    let goose = reloaded
        .find::<Tavern>("the goose")
        .expect("The Goose should be saved");
    assert_eq!(goose.menu.get("ale"), Some(&0.2));
}

#[tokio::test]
async fn test_add_town_and_shopkeep() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(
        &mut dm,
        "add town",
        ["Port Ember", "800", "Harbormaster Vell", "Sailors, Sailors, Smugglers", ""],
    )
    .await;
    assert_eq!(reply.text(), "Port Ember has been added successfully.");

    let reply = run(
        &mut dm,
        "add shopkeep",
        ["Mira", "Human", "Salt and Sail", "Port Ember", ""],
    )
    .await;
    assert_eq!(reply.text(), "Mira has been added successfully.");

    let town = run(&mut dm, "port ember info", Vec::<String>::new()).await;
    assert!(town.text().contains("Guilds: Sailors, Smugglers"));
    let keeper = run(&mut dm, "Mira info", Vec::<String>::new()).await;
    assert!(keeper.text().contains("Shop: Salt and Sail"));
}

#[tokio::test]
async fn test_closed_input_during_add_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    dm.prompter_mut().push("Thorin");
    let err = dm.interpret("add character").await.unwrap_err();
    assert!(matches!(err, InterpretError::Prompt(_)));
    assert!(dm.repository().find::<Character>("Thorin").is_none());
}

// =============================================================================
// Editing records
// =============================================================================

#[tokio::test]
async fn test_edit_character_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "edit character spike", ["level", "9"]).await;
    assert_eq!(
        reply.text(),
        "Spike's details have been updated successfully."
    );

    // Level 9 bonus is 4: charisma 4 + 4.
    let reply = run(&mut dm, "Spike persuasion", Vec::<String>::new()).await;
    assert_eq!(reply.text(), "Spike's Persuasion: 8");

    let reloaded = Repository::load(config).await.expect("Load should succeed");
    assert_eq!(reloaded.find::<Character>("Spike").map(|c| c.level), Some(9));
}

#[tokio::test]
async fn test_edit_prompts_for_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "edit god", ["Habit", "patronage", "greed, trade, luck"]).await;
    assert_eq!(reply.text(), "Habit's details have been updated successfully.");

    let reply = run(&mut dm, "god of luck", Vec::<String>::new()).await;
    assert_eq!(reply.text(), "The god of luck is Habit.");
}

#[tokio::test]
async fn test_edit_unknown_entity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "edit character Bob", Vec::<String>::new()).await;
    assert_eq!(reply.text(), "No character named Bob found.");

    let reply = run(&mut dm, "edit god Bane", Vec::<String>::new()).await;
    assert_eq!(reply.text(), "No god named Bane found.");
}

#[tokio::test]
async fn test_edit_invalid_attribute_saves_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = StorageConfig::new(temp_dir.path());
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "edit character Spike", ["hit points"]).await;
    assert_eq!(reply.text(), "Invalid attribute.");
    assert!(!config.path_for(EntityKind::Character).exists());
}

#[tokio::test]
async fn test_edit_bad_value_leaves_character_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);
    let before = dm.repository().find::<Character>("Vex").cloned();

    let reply = run(&mut dm, "edit character Vex", ["ability modifiers", "0", "3", "x"]).await;
    assert!(reply.text().starts_with("Error: invalid number for constitution modifier"));
    assert_eq!(dm.repository().find::<Character>("Vex").cloned(), before);
}

#[tokio::test]
async fn test_rename_collision_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dm = campaign(&temp_dir);

    let reply = run(&mut dm, "edit character Spike", ["name", "vex"]).await;
    assert_eq!(reply.text(), "A character named vex already exists.");

    // Changing only the case of your own name is fine.
    let reply = run(&mut dm, "edit god habit", ["name", "HABIT"]).await;
    assert_eq!(reply.text(), "HABIT's details have been updated successfully.");
    assert!(dm.repository().find::<God>("habit").is_some());
}
