//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use passplay_tictactoe::{ClockConfig, DEFAULT_INTERVAL, DEFAULT_MAX_TIME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Top-level configuration for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File receiving tracing output while the terminal UI owns the screen.
    log_file: PathBuf,

    /// Turn clock settings.
    clock: ClockSettings,
}

/// The `[clock]` table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Whether turns are timed at all.
    enabled: bool,

    /// Ticks per turn.
    turn_seconds: u32,

    /// Milliseconds between ticks.
    tick_millis: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            turn_seconds: DEFAULT_MAX_TIME,
            tick_millis: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("passplay.log"),
            clock: ClockSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(timer = config.clock.enabled, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path` when given, otherwise uses defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of the file settings.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, no_timer: bool, turn_seconds: Option<u32>) -> Self {
        if no_timer {
            self.clock.enabled = false;
        }
        if let Some(seconds) = turn_seconds {
            self.clock.turn_seconds = seconds;
        }
        self
    }

    /// Builds the engine's clock configuration, `None` when the timer is off.
    ///
    /// # Errors
    ///
    /// Returns an error when the turn length or tick period is zero.
    pub fn clock_config(&self) -> Result<Option<ClockConfig>, ConfigError> {
        if !self.clock.enabled {
            return Ok(None);
        }
        ClockConfig::new(
            self.clock.turn_seconds,
            Duration::from_millis(self.clock.tick_millis),
        )
        .map(Some)
        .map_err(|e| ConfigError::new(e.to_string()))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
