//! Pass-and-play tic-tac-toe.
//!
//! Pure game logic for two players sharing one screen:
//!
//! - [`GameEngine`] holds the board, the active player, the status, and
//!   cumulative scores, and notifies [`GameObserver`]s of every change.
//! - [`TurnClock`] is an optional per-turn countdown driven by a host
//!   supplied [`TickScheduler`].
//! - [`TimedGame`] combines the two: the clock restarts after each move and
//!   passes the turn when it runs out.
//!
//! # Example
//!
//! ```
//! use passplay_tictactoe::{GameEngine, GameStatus, MoveOutcome, Player};
//!
//! let mut engine = GameEngine::new();
//! for index in [0, 3, 1, 4] {
//!     engine.apply_move(index)?;
//! }
//! let outcome = engine.apply_move(2)?;
//! assert!(matches!(outcome, MoveOutcome::Won { winner: Player::X, .. }));
//! assert_eq!(engine.status(), GameStatus::Won(Player::X));
//! assert_eq!(engine.scores().get(Player::X), 1);
//! # Ok::<(), passplay_tictactoe::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod engine;
mod error;
mod events;
mod position;
pub mod rules;
mod timed;
mod types;

pub use clock::{
    ClockConfig, ClockState, ClockTick, DEFAULT_INTERVAL, DEFAULT_MAX_TIME, ManualScheduler,
    TickHandle, TickScheduler, TurnClock, Urgency,
};
pub use engine::{GameEngine, GameSnapshot, IgnoreReason, MoveOutcome};
pub use error::EngineError;
pub use events::{GameEvent, GameObserver};
pub use position::Position;
pub use rules::{WIN_LINES, WinLine, check_winner, is_draw, winning_line};
pub use timed::TimedGame;
pub use types::{Board, GameStatus, Player, ScoreBoard, Square};
