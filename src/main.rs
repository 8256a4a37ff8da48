//! Passplay - terminal tic-tac-toe for two players sharing a keyboard.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use passplay::{AppConfig, run_tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            no_timer,
            turn_seconds,
        } => {
            let config = AppConfig::load(config.as_deref())?.with_overrides(no_timer, turn_seconds);
            run_tui(config).await
        }
        Command::PrintConfig { config } => {
            let config = AppConfig::load(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
