//! Adventure game client binary.
//!
//! Composition root: reads process configuration, installs logging, loads the
//! game content and hands everything to the interactive [`App`].
//!
//! ```bash
//! # Play with a fixed seed and a custom save directory
//! GAME_RNG_SEED=42 SAVE_DATA_DIR=./saves cargo run -p adventure-client
//! ```

mod app;
mod command;
mod console;
mod content;
mod logging;
mod view;

use std::io;

use anyhow::{Context, Result};
use runtime::{FileSaveRepository, RuntimeConfig};

use crate::app::App;
use crate::console::Console;
use crate::content::GameContent;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _log_guard = logging::setup_logging()?;

    tracing::info!(
        save_dir = %config.save_data_dir.display(),
        slot = %config.save_slot,
        seed = ?config.rng_seed,
        "starting adventure client"
    );

    let content = GameContent::load(&config)?;
    let repo = FileSaveRepository::new(&config.save_data_dir).with_context(|| {
        format!(
            "failed to open save directory {}",
            config.save_data_dir.display()
        )
    })?;

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut app = App::new(content, Box::new(repo), config.save_slot, console)
        .with_rng_seed(config.rng_seed);
    app.run()?;

    tracing::info!("client shutdown complete");
    Ok(())
}
