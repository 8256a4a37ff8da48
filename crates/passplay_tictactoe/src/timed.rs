//! A [`GameEngine`] with a [`TurnClock`] layered on top.
//!
//! The engine stays time-agnostic. This wrapper stops the clock before an
//! accepted move touches the board, restarts it when play continues, and
//! passes the turn when the clock runs out.

use crate::{
    ClockTick, EngineError, GameEngine, GameEvent, GameObserver, MoveOutcome, TickHandle,
    TickScheduler, TurnClock,
};
use tracing::{info, instrument};

/// Game engine plus turn clock.
#[derive(Debug)]
pub struct TimedGame<S> {
    engine: GameEngine,
    clock: TurnClock<S>,
}

impl<S: TickScheduler> TimedGame<S> {
    /// Wraps an engine with a stopped clock. Call [`start`](Self::start)
    /// to begin the first turn.
    pub fn new(engine: GameEngine, clock: TurnClock<S>) -> Self {
        Self { engine, clock }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The turn clock.
    pub fn clock(&self) -> &TurnClock<S> {
        &self.clock
    }

    /// Registers an observer on the engine. Clock events go to the same
    /// observers.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.engine.subscribe(observer);
    }

    /// Starts the clock for the current turn. Does nothing once the game
    /// has ended.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.engine.status().is_terminal() {
            return;
        }
        self.restart_clock();
    }

    /// Places a mark, managing the clock around it.
    ///
    /// Ignored moves leave the clock running untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] if `index` is not 0-8.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, EngineError> {
        if !self.engine.can_accept(index)? {
            return self.engine.apply_move(index);
        }

        self.clock.stop();
        let outcome = self.engine.apply_move(index)?;
        if let MoveOutcome::Continued { .. } = outcome {
            self.restart_clock();
        }
        Ok(outcome)
    }

    /// Feeds one tick from `handle` to the clock.
    ///
    /// Returns `None` if the tick was stale. On expiry the turn passes to
    /// the other player and the refilled clock keeps running.
    #[instrument(skip(self))]
    pub fn on_tick(&mut self, handle: TickHandle) -> Option<ClockTick> {
        let tick = self.clock.tick(handle)?;
        let max = self.clock.max_time();

        match tick {
            ClockTick::Counting(remaining) => {
                self.engine.notify(GameEvent::ClockTicked { remaining, max });
            }
            ClockTick::Expired => {
                self.engine
                    .notify(GameEvent::ClockTicked { remaining: 0, max });
                match self.engine.pass_turn() {
                    Some(next) => {
                        info!(%next, "Turn timed out");
                        self.engine.notify(GameEvent::TurnExpired { next });
                        self.engine.notify(GameEvent::ClockTicked {
                            remaining: self.clock.remaining(),
                            max,
                        });
                    }
                    None => self.clock.stop(),
                }
            }
        }

        Some(tick)
    }

    /// Clears the board and starts a fresh turn clock. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.clock.stop();
        self.engine.reset();
        self.restart_clock();
    }

    /// Zeroes the scores, clears the board, and starts a fresh turn clock.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.clock.stop();
        self.engine.reset_scores();
        self.restart_clock();
    }

    fn restart_clock(&mut self) {
        self.clock.start();
        self.engine.notify(GameEvent::ClockTicked {
            remaining: self.clock.remaining(),
            max: self.clock.max_time(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockConfig, ClockState, ManualScheduler, Player};

    fn timed() -> TimedGame<ManualScheduler> {
        TimedGame::new(
            GameEngine::new(),
            TurnClock::new(ClockConfig::default(), ManualScheduler::new()),
        )
    }

    #[test]
    fn test_continued_move_restarts_clock() {
        let mut game = timed();
        game.start();
        let first = game.clock().handle().unwrap();
        game.on_tick(first);

        game.apply_move(4).unwrap();

        let second = game.clock().handle().unwrap();
        assert_ne!(first, second);
        assert_eq!(game.clock().remaining(), 4);
        assert_eq!(game.clock().scheduler().live_handles(), &[second]);
    }

    #[test]
    fn test_ignored_move_leaves_clock_alone() {
        let mut game = timed();
        game.start();
        game.apply_move(4).unwrap();
        let handle = game.clock().handle().unwrap();
        game.on_tick(handle);

        let outcome = game.apply_move(4).unwrap();

        assert!(!outcome.is_accepted());
        assert_eq!(game.clock().handle(), Some(handle));
        assert_eq!(game.clock().remaining(), 3);
    }

    #[test]
    fn test_invalid_index_leaves_clock_alone() {
        let mut game = timed();
        game.start();
        let handle = game.clock().handle();
        assert!(game.apply_move(42).is_err());
        assert_eq!(game.clock().handle(), handle);
    }

    #[test]
    fn test_win_stops_clock() {
        let mut game = timed();
        game.start();
        for index in [0, 3, 1, 4, 2] {
            game.apply_move(index).unwrap();
        }
        assert_eq!(game.clock().state(), ClockState::Stopped);
        assert!(game.clock().scheduler().live_handles().is_empty());
    }

    #[test]
    fn test_start_after_game_over_does_nothing() {
        let mut game = timed();
        for index in [0, 3, 1, 4, 2] {
            game.apply_move(index).unwrap();
        }
        game.start();
        assert_eq!(game.clock().state(), ClockState::Stopped);
    }

    #[test]
    fn test_reset_restarts_clock() {
        let mut game = timed();
        for index in [0, 3, 1, 4, 2] {
            game.apply_move(index).unwrap();
        }
        game.reset();
        assert_eq!(game.clock().state(), ClockState::Running);
        assert_eq!(game.engine().current_player(), Player::X);
        assert_eq!(game.clock().scheduler().live_handles().len(), 1);
    }
}
