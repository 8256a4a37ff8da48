//! Terminal UI for passplay.

mod app;
mod input;
mod scheduler;
mod ui;

pub use app::{App, Session};
pub use input::{Action, Direction, action_for, move_cursor};
pub use scheduler::TokioScheduler;

use crate::config::AppConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use passplay_tictactoe::{GameEngine, GameEvent, TickHandle, TimedGame, TurnClock};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// How long to wait for a key before checking the clock again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the TUI until the players quit.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(timer = *config.clock().enabled(), "Starting passplay TUI");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<TickHandle>();

    let engine = GameEngine::new();
    let session = match config.clock_config()? {
        Some(clock_config) => Session::Timed(TimedGame::new(
            engine,
            TurnClock::new(clock_config, TokioScheduler::new(tick_tx)),
        )),
        None => Session::Untimed(engine),
    };

    let mut app = App::new(session);
    app.session_mut().subscribe(move |event: &GameEvent| {
        // Receiver lives as long as the loop below.
        let _ = event_tx.send(event.clone());
    });

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    app.start();
    let res = run_loop(&mut terminal, &mut app, &mut event_rx, &mut tick_rx).await;

    drop(guard);
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Raw mode and the alternate screen, undone on drop.
///
/// Created before anything else can fail, so an early `?` still leaves the
/// terminal usable.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        Self::enter_with(
            enable_raw_mode,
            || execute!(io::stdout(), EnterAlternateScreen),
            restore_terminal,
        )
    }

    /// Runs `raw` then `screen`; once `raw` succeeded, `restore` runs on drop
    /// even if `screen` fails.
    fn enter_with(
        raw: fn() -> io::Result<()>,
        screen: fn() -> io::Result<()>,
        restore: fn() -> io::Result<()>,
    ) -> io::Result<Self> {
        raw()?;
        let guard = Self { restore };
        screen()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen)?;
    raw
}

/// Drains ticks and engine events, redraws, then waits briefly for a key.
#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<TokioScheduler>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
    tick_rx: &mut mpsc::UnboundedReceiver<TickHandle>,
) -> Result<()> {
    loop {
        while let Ok(handle) = tick_rx.try_recv() {
            app.on_tick(handle);
        }
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = action_for(key.code) {
                        app.apply(action);
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
