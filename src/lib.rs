//! Passplay - pass-and-play tic-tac-toe in the terminal.
//!
//! The game rules live in [`passplay_tictactoe`]; this crate is the host
//! around them:
//!
//! - **Config**: TOML settings for the turn clock and logging
//! - **TUI**: a ratatui renderer that observes the engine
//! - **Scheduler**: tokio-driven ticks for the turn clock

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod tui;

pub use config::{AppConfig, ClockSettings, ConfigError};
pub use tui::{Action, App, Direction, Session, TokioScheduler, action_for, move_cursor, run_tui};
