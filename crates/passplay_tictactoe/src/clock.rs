//! Per-turn countdown.
//!
//! The clock never sleeps or spawns anything itself. A [`TickScheduler`]
//! supplied by the host produces periodic ticks tagged with a
//! [`TickHandle`]; the host feeds them back through [`TurnClock::tick`].
//! The clock owns at most one live handle at a time.

use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Turn length used when nothing else is configured.
pub const DEFAULT_MAX_TIME: u32 = 4;

/// Tick period used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one periodic tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("tick#{}", _0)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Wraps a scheduler-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Source of periodic ticks.
pub trait TickScheduler {
    /// Begins ticking every `interval`. Each tick must be reported to the
    /// clock with the returned handle.
    fn schedule(&mut self, interval: Duration) -> TickHandle;

    /// Stops the ticks of `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler driven by hand. Nothing ticks unless the caller says so.
///
/// Keeps the set of live handles so hosts and tests can check that only
/// one timer is ever running.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    live: Vec<TickHandle>,
}

impl ManualScheduler {
    /// Creates a scheduler with no live handles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles scheduled and not yet cancelled.
    pub fn live_handles(&self) -> &[TickHandle] {
        &self.live
    }

    /// The most recently scheduled live handle.
    pub fn active(&self) -> Option<TickHandle> {
        self.live.last().copied()
    }

    /// How many handles were ever scheduled.
    pub fn scheduled_count(&self) -> u64 {
        self.next_id
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, _interval: Duration) -> TickHandle {
        let handle = TickHandle::new(self.next_id);
        self.next_id += 1;
        self.live.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.live.retain(|h| *h != handle);
    }
}

/// Turn length and tick period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    max_time: u32,
    interval: Duration,
}

impl ClockConfig {
    /// Creates a clock configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidClockConfig`] if either value is zero.
    pub fn new(max_time: u32, interval: Duration) -> Result<Self, EngineError> {
        if max_time == 0 {
            return Err(EngineError::InvalidClockConfig {
                reason: "turn length must be at least one tick".to_string(),
            });
        }
        if interval.is_zero() {
            return Err(EngineError::InvalidClockConfig {
                reason: "tick interval must be non-zero".to_string(),
            });
        }
        Ok(Self { max_time, interval })
    }

    /// Ticks in a full turn.
    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_time: DEFAULT_MAX_TIME,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Whether the clock is counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockState {
    /// A tick source is live.
    Running,
    /// No tick source.
    Stopped,
}

/// How close the current turn is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    /// More than two ticks left.
    Calm,
    /// Two ticks left.
    Warning,
    /// One tick or less left.
    Critical,
}

impl Urgency {
    /// Classifies a remaining tick count.
    pub fn from_remaining(remaining: u32) -> Self {
        match remaining {
            0 | 1 => Urgency::Critical,
            2 => Urgency::Warning,
            _ => Urgency::Calm,
        }
    }
}

/// Result of a tick the clock accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockTick {
    /// Still counting, with this many ticks left.
    Counting(u32),
    /// Time ran out. The clock has already refilled and keeps running.
    Expired,
}

/// Countdown for one turn at a time.
#[derive(Debug)]
pub struct TurnClock<S> {
    config: ClockConfig,
    scheduler: S,
    handle: Option<TickHandle>,
    remaining: u32,
}

impl<S: TickScheduler> TurnClock<S> {
    /// Creates a stopped clock showing a full turn.
    pub fn new(config: ClockConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            handle: None,
            remaining: config.max_time(),
        }
    }

    /// Ticks in a full turn.
    pub fn max_time(&self) -> u32 {
        self.config.max_time()
    }

    /// Ticks left in the current turn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether a tick source is live.
    pub fn state(&self) -> ClockState {
        if self.handle.is_some() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    /// The live tick handle, if running.
    pub fn handle(&self) -> Option<TickHandle> {
        self.handle
    }

    /// How urgent the current turn is.
    pub fn urgency(&self) -> Urgency {
        Urgency::from_remaining(self.remaining)
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Refills the clock and begins ticking.
    ///
    /// A clock that is already running has its old tick source cancelled
    /// first, so two sources never overlap.
    #[instrument(skip(self), fields(max_time = self.config.max_time()))]
    pub fn start(&mut self) {
        if let Some(old) = self.handle.take() {
            warn!(%old, "Clock restarted while running");
            self.scheduler.cancel(old);
        }
        self.remaining = self.config.max_time();
        let handle = self.scheduler.schedule(self.config.interval());
        debug!(%handle, "Clock started");
        self.handle = Some(handle);
    }

    /// Cancels the tick source. Does nothing if already stopped.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(%handle, remaining = self.remaining, "Clock stopped");
            self.scheduler.cancel(handle);
        }
    }

    /// Counts down one tick from `handle`.
    ///
    /// Returns `None` when the clock is stopped or `handle` is not the live
    /// one, e.g. a tick from a cancelled source that was already queued.
    /// On expiry the clock refills and keeps the same handle.
    #[instrument(skip(self), fields(remaining = self.remaining))]
    pub fn tick(&mut self, handle: TickHandle) -> Option<ClockTick> {
        if self.handle != Some(handle) {
            debug!(%handle, "Stale tick ignored");
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            debug!("Turn expired");
            self.remaining = self.config.max_time();
            Some(ClockTick::Expired)
        } else {
            Some(ClockTick::Counting(self.remaining))
        }
    }
}
