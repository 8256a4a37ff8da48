//! Application state and logic.

use super::input::{Action, move_cursor};
use passplay_tictactoe::{
    ClockTick, EngineError, GameEngine, GameEvent, GameObserver, GameStatus, MoveOutcome,
    Position, TickHandle, TickScheduler, TimedGame, Urgency,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// How long the time-out notice stays on the status line.
const FLASH_DURATION: Duration = Duration::from_secs(1);

/// The game being played, with or without a turn clock.
#[derive(Debug)]
pub enum Session<S> {
    /// Turns are timed.
    Timed(TimedGame<S>),
    /// Turns last until a mark is placed.
    Untimed(GameEngine),
}

impl<S: TickScheduler> Session<S> {
    /// The underlying engine.
    pub fn engine(&self) -> &GameEngine {
        match self {
            Session::Timed(game) => game.engine(),
            Session::Untimed(engine) => engine,
        }
    }

    /// Registers an observer on the engine.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        match self {
            Session::Timed(game) => game.subscribe(observer),
            Session::Untimed(engine) => engine.subscribe(observer),
        }
    }

    /// Starts the clock, if there is one.
    pub fn start(&mut self) {
        if let Session::Timed(game) = self {
            game.start();
        }
    }

    /// Places the current player's mark.
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, EngineError> {
        match self {
            Session::Timed(game) => game.apply_move(index),
            Session::Untimed(engine) => engine.apply_move(index),
        }
    }

    /// Feeds a clock tick. Untimed sessions ignore it.
    pub fn on_tick(&mut self, handle: TickHandle) -> Option<ClockTick> {
        match self {
            Session::Timed(game) => game.on_tick(handle),
            Session::Untimed(_) => None,
        }
    }

    /// Clears the board.
    pub fn reset(&mut self) {
        match self {
            Session::Timed(game) => game.reset(),
            Session::Untimed(engine) => engine.reset(),
        }
    }

    /// Zeroes scores and clears the board.
    pub fn reset_scores(&mut self) {
        match self {
            Session::Timed(game) => game.reset_scores(),
            Session::Untimed(engine) => engine.reset_scores(),
        }
    }

    /// How close the current turn is to running out, for timed sessions.
    pub fn urgency(&self) -> Option<Urgency> {
        match self {
            Session::Timed(game) => Some(game.clock().urgency()),
            Session::Untimed(_) => None,
        }
    }

    /// `(remaining, max)` for timed sessions.
    pub fn clock(&self) -> Option<(u32, u32)> {
        match self {
            Session::Timed(game) => Some((game.clock().remaining(), game.clock().max_time())),
            Session::Untimed(_) => None,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App<S> {
    session: Session<S>,
    cursor: Position,
    clock: Option<(u32, u32)>,
    flash: Option<(String, Instant)>,
    should_quit: bool,
}

impl<S: TickScheduler> App<S> {
    /// Creates a new application around a session.
    pub fn new(session: Session<S>) -> Self {
        let clock = session.clock();
        Self {
            session,
            cursor: Position::Center,
            clock,
            flash: None,
            should_quit: false,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Mutable access to the session, for subscribing observers.
    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    /// The highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Last clock reading seen, `(remaining, max)`.
    pub fn clock(&self) -> Option<(u32, u32)> {
        self.clock
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts the first turn.
    pub fn start(&mut self) {
        info!("Starting game");
        self.session.start();
    }

    /// Carries out a keyboard action.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Cursor(direction) => {
                self.cursor = move_cursor(self.cursor, direction);
            }
            Action::PlaceAtCursor => self.place(self.cursor),
            Action::Place(pos) => {
                self.cursor = pos;
                self.place(pos);
            }
            Action::Reset => self.session.reset(),
            Action::ResetScores => self.session.reset_scores(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
        }
    }

    /// Feeds a tick from the scheduler to the session.
    pub fn on_tick(&mut self, handle: TickHandle) {
        self.session.on_tick(handle);
    }

    /// Handles a game event from the engine.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::ClockTicked { remaining, max } => {
                self.clock = Some((remaining, max));
            }
            GameEvent::TurnExpired { next } => {
                self.flash = Some((
                    format!("Time Out! {}'s Turn", next),
                    Instant::now() + FLASH_DURATION,
                ));
            }
            // Any move or turn change makes the time-out notice stale.
            GameEvent::BoardChanged(_) | GameEvent::TurnChanged(_) | GameEvent::GameReset => {
                self.flash = None;
            }
            _ => {}
        }
    }

    /// Status line text as of `now`.
    pub fn status_message(&self, now: Instant) -> String {
        if let Some((message, until)) = &self.flash {
            if now < *until && !self.session.engine().status().is_terminal() {
                return message.clone();
            }
        }

        let engine = self.session.engine();
        match engine.status() {
            GameStatus::InProgress => format!("Player {}'s Turn", engine.current_player()),
            GameStatus::Won(player) => format!("Player {} Wins!", player),
            GameStatus::Draw => "Game Draw!".to_string(),
        }
    }

    fn place(&mut self, pos: Position) {
        match self.session.apply_move(pos.to_index()) {
            Ok(outcome) => debug!(?outcome, %pos, "Move handled"),
            Err(e) => warn!(error = %e, "Move rejected"),
        }
    }
}
