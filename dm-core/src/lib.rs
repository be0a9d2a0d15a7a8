//! Campaign assistant for a D&D 5e Dungeon Master.
//!
//! This crate provides:
//! - Campaign records (characters, gods, shops, towns, shopkeeps, taverns)
//! - Stat resolution for abilities and skills
//! - A line-oriented command interpreter with interactive add/edit flows
//! - JSON persistence, one file per record kind
//!
//! # Quick Start
//!
//! ```ignore
//! use dm_core::{Interpreter, Repository, StorageConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = Repository::load(StorageConfig::from_env()).await?;
//!     let mut interpreter = Interpreter::new(repo, my_prompter);
//!
//!     let reply = interpreter.interpret("perception check").await?;
//!     println!("{}", reply.text());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod entry;
pub mod persist;
pub mod rules;
pub mod testing;
pub mod world;

// Primary public API
pub use commands::{parse, Command, InterpretError, Interpreter, Reply, Subject};
pub use config::StorageConfig;
pub use entry::{CharacterEdit, EntryError, GodEdit, Prompter};
pub use persist::{Entity, EntityKind, PersistError, Repository};
pub use rules::{best_for, resolve, Stat, StatSheet};
pub use world::{Ability, Character, God, Shop, Shopkeep, Skill, Tavern, Town, Wealth};
