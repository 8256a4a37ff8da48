//! Notifications from the engine to whoever renders it.

use crate::{Board, GameStatus, Player, ScoreBoard, WinLine};
use serde::{Deserialize, Serialize};

/// Something observable changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New board snapshot after a mark was placed or the board was cleared.
    BoardChanged(Board),
    /// The active player changed.
    TurnChanged(Player),
    /// The game status changed.
    StatusChanged(GameStatus),
    /// The line that won the game, for highlighting.
    LineCompleted(WinLine),
    /// Cumulative scores changed.
    ScoresChanged(ScoreBoard),
    /// The turn clock counted down or was refilled.
    ClockTicked {
        /// Seconds (ticks) left in the turn.
        remaining: u32,
        /// Length of a full turn.
        max: u32,
    },
    /// The turn clock ran out and the turn passed.
    TurnExpired {
        /// The player whose turn it now is.
        next: Player,
    },
    /// A new game started on a cleared board.
    GameReset,
}

/// Receives engine notifications.
///
/// Implemented for any `FnMut(&GameEvent)`, so a closure is enough for
/// most renderers.
pub trait GameObserver {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Box<dyn GameObserver>>,
}

impl Observers {
    pub(crate) fn push(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn notify(&mut self, event: GameEvent) {
        tracing::trace!(?event, observers = self.observers.len(), "Notifying");
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}
