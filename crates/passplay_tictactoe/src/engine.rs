//! The game engine: board, turn, status, and scores.
//!
//! The engine knows nothing about time. A turn clock, when wanted, is
//! layered on top by [`TimedGame`](crate::TimedGame).

use crate::events::Observers;
use crate::rules::{WinLine, winning_line};
use crate::{Board, EngineError, GameEvent, GameObserver, GameStatus, Player, Position, ScoreBoard, Square};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a move was dropped without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// The game already ended.
    #[display("Game is already over")]
    GameOver,
    /// The square already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(Position),
}

/// What a call to [`GameEngine::apply_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// Mark placed, the game goes on with `next` to move.
    Continued {
        /// Player to move next.
        next: Player,
    },
    /// Mark placed and it completed a line.
    Won {
        /// The player who completed the line.
        winner: Player,
        /// The completed line.
        line: WinLine,
    },
    /// Mark placed and filled the board without a line.
    Draw,
}

impl MoveOutcome {
    /// Whether a mark was placed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }

    /// Whether the move ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Won { .. } | MoveOutcome::Draw)
    }
}

/// Read-only view of the engine for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameSnapshot {
    /// The board.
    board: Board,
    /// Player to move, or the last mover once the game ended.
    current_player: Player,
    /// Game status.
    status: GameStatus,
    /// Cumulative scores.
    scores: ScoreBoard,
    /// The completed line, if the game was won.
    winning_line: Option<WinLine>,
}

/// Pass-and-play tic-tac-toe engine.
///
/// Owns all game state. Hosts drive it with [`apply_move`](Self::apply_move),
/// [`reset`](Self::reset) and [`reset_scores`](Self::reset_scores), and learn
/// about changes through [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: GameStatus,
    scores: ScoreBoard,
    winning_line: Option<WinLine>,
    observers: Observers,
}

impl GameEngine {
    /// Creates an engine with an empty board, X to move, and zero scores.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            scores: ScoreBoard::new(),
            winning_line: None,
            observers: Observers::default(),
        }
    }

    /// Registers an observer for all future events.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the cumulative scores.
    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Returns the completed line once the game is won.
    pub fn winning_line(&self) -> Option<WinLine> {
        self.winning_line
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(
            self.board,
            self.current_player,
            self.status,
            self.scores,
            self.winning_line,
        )
    }

    /// Reports whether a move at `index` would be accepted, without making it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] if `index` is not 0-8.
    pub fn can_accept(&self, index: usize) -> Result<bool, EngineError> {
        let pos = Position::try_from(index)?;
        Ok(self.rejection(pos).is_none())
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// Moves on an occupied square or after the game ended are ignored:
    /// nothing changes and no event is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] if `index` is not 0-8. That is
    /// a host bug, not a misclick, so it is reported instead of ignored.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, EngineError> {
        let pos = Position::try_from(index)?;

        if let Some(reason) = self.rejection(pos) {
            debug!(%reason, "Move ignored");
            return Ok(MoveOutcome::Ignored(reason));
        }

        let player = self.current_player;
        self.board.set(pos, Square::Occupied(player));
        self.observers.notify(GameEvent::BoardChanged(self.board));

        let outcome = if let Some((winner, line)) = winning_line(&self.board) {
            info!(%winner, line = ?line.indices(), "Game won");
            self.status = GameStatus::Won(winner);
            self.winning_line = Some(line);
            self.scores.record_win(winner);
            self.observers.notify(GameEvent::StatusChanged(self.status));
            self.observers.notify(GameEvent::LineCompleted(line));
            self.observers.notify(GameEvent::ScoresChanged(self.scores));
            MoveOutcome::Won { winner, line }
        } else if self.board.is_full() {
            info!("Game drawn");
            self.status = GameStatus::Draw;
            self.observers.notify(GameEvent::StatusChanged(self.status));
            MoveOutcome::Draw
        } else {
            let next = self.switch_player();
            MoveOutcome::Continued { next }
        };

        Ok(outcome)
    }

    /// Hands the turn to the other player without a move.
    ///
    /// Used when the turn clock runs out. Returns the new current player,
    /// or `None` if the game has already ended.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn pass_turn(&mut self) -> Option<Player> {
        if self.status.is_terminal() {
            debug!("Turn pass ignored, game over");
            return None;
        }
        Some(self.switch_player())
    }

    /// Clears the board for a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting board");
        self.board.clear();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;

        self.observers.notify(GameEvent::GameReset);
        self.observers.notify(GameEvent::BoardChanged(self.board));
        self.observers.notify(GameEvent::TurnChanged(self.current_player));
        self.observers.notify(GameEvent::StatusChanged(self.status));
    }

    /// Zeroes the scores, then starts a new game.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        info!("Resetting scores");
        self.scores.clear();
        self.observers.notify(GameEvent::ScoresChanged(self.scores));
        self.reset();
    }

    pub(crate) fn notify(&mut self, event: GameEvent) {
        self.observers.notify(event);
    }

    fn rejection(&self, pos: Position) -> Option<IgnoreReason> {
        if self.status.is_terminal() {
            Some(IgnoreReason::GameOver)
        } else if !self.board.is_empty(pos) {
            Some(IgnoreReason::Occupied(pos))
        } else {
            None
        }
    }

    fn switch_player(&mut self) -> Player {
        self.current_player = self.current_player.opponent();
        debug!(next = %self.current_player, "Turn changed");
        self.observers.notify(GameEvent::TurnChanged(self.current_player));
        self.current_player
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
