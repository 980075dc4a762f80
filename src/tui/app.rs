//! Main TUI application.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::provider::{Aggregator, DisplayList};
use crate::view::sort_backends;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Filters and sorts the latest poll according to the session state.
pub(crate) fn display_list<'a>(aggregator: &'a Aggregator, state: &AppState) -> DisplayList<'a> {
    let mut list = aggregator.display(state.filter.as_ref());
    if let Some(key) = state.view.sort_fn(state.sort_column) {
        sort_backends(&mut list.backends, key, state.sort_reversed);
    }
    list
}

/// Main TUI application.
pub struct App {
    aggregator: Aggregator,
    state: AppState,
    shutdown: Arc<AtomicBool>,
}

impl App {
    pub fn new(aggregator: Aggregator, state: AppState) -> Self {
        Self {
            aggregator,
            state,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop at its next iteration when set.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Runs the poll, render and input loop until quit.
    ///
    /// The terminal is restored before this returns, on every path.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        let mut terminal = TerminalGuard::enter()?;
        let mut events = EventHandler::new(tick_rate);

        info!(
            servers = self.aggregator.servers().len(),
            interval_ms = tick_rate.as_millis() as u64,
            "starting"
        );
        self.aggregator.poll();

        while !self.shutdown.load(Ordering::SeqCst) {
            self.state.expire_notice(Instant::now());

            let list = display_list(&self.aggregator, &self.state);
            let clock = Local::now().time();
            terminal.draw(|frame| render(frame, &self.state, &list, clock))?;

            match events.next()? {
                Event::Tick => {
                    // Modals block refresh
                    if !self.state.input_mode.is_modal() {
                        self.aggregator.poll();
                    }
                }
                Event::Key(key) => {
                    if handle_key(&mut self.state, key) == KeyAction::Quit {
                        break;
                    }
                }
                Event::Resize => debug!("terminal resized"),
                Event::Wake => {}
            }
        }

        info!("stopping");
        Ok(())
    }
}

/// Owns the terminal in raw mode on the alternate screen; restores it on drop.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let setup = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())));
        match setup {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore();
                Err(e)
            }
        }
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}
