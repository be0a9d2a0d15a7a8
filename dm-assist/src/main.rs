//! DM assistant console.
//!
//! Answers quick rules and lore questions about a campaign and records new
//! characters, gods and world-building notes.
//!
//! ```bash
//! DM_ASSIST_DATA_DIR=./campaign cargo run -p dm-assist
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=dm_core=debug` to see which rule each
//! command matched.

mod console;

use anyhow::Context;
use dm_core::{Interpreter, Repository, StorageConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use console::StdinPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    init_logging();

    let config = StorageConfig::from_env();
    let repo = Repository::load(config.clone()).await.with_context(|| {
        format!(
            "failed to load campaign data from {}",
            config.data_dir.display()
        )
    })?;

    let mut interpreter = Interpreter::new(repo, StdinPrompter);
    console::run(&mut interpreter)
        .await
        .context("failed to read from the console")?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
