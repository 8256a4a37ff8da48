//! Error types for the game engine.

/// Errors reported to the host when it misuses the engine.
///
/// Ordinary misclicks (an occupied cell, a finished game) are not errors;
/// they come back as [`crate::MoveOutcome::Ignored`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The cell index is outside the 3x3 board.
    #[display("Cell index {} is out of range (must be 0-8)", index)]
    InvalidIndex {
        /// The rejected index.
        index: usize,
    },

    /// Clock settings that cannot drive a countdown.
    #[display("Invalid clock configuration: {}", reason)]
    InvalidClockConfig {
        /// What was wrong with the settings.
        reason: String,
    },
}

impl std::error::Error for EngineError {}
