//! Command-line interface for passplay.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Passplay - pass-and-play tic-tac-toe with a turn clock
#[derive(Parser, Debug)]
#[command(name = "passplay")]
#[command(about = "Two players, one terminal, four seconds a turn", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Play without the turn clock
        #[arg(long)]
        no_timer: bool,

        /// Seconds per turn (overrides the config file)
        #[arg(long)]
        turn_seconds: Option<u32>,
    },

    /// Print the effective configuration as TOML
    PrintConfig {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
