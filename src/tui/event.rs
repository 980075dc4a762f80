//! Event handling for TUI.
//!
//! One bounded wait per loop iteration: either a key arrives or the tick
//! deadline passes. Runs on the UI thread; nothing polls in the background.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Refresh interval elapsed.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
    /// A signal interrupted the wait; the tick deadline is unchanged.
    Wake,
}

/// Outcome of one bounded wait on the terminal.
#[derive(Debug, PartialEq, Eq)]
enum Wait {
    Ready,
    TimedOut,
    Interrupted,
}

fn wait_outcome(polled: io::Result<bool>) -> io::Result<Wait> {
    match polled {
        Ok(true) => Ok(Wait::Ready),
        Ok(false) => Ok(Wait::TimedOut),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Wait::Interrupted),
        Err(e) => Err(e),
    }
}

/// Waits for input with the tick deadline as timeout.
pub struct EventHandler {
    tick_rate: Duration,
    next_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            next_tick: Instant::now() + tick_rate,
        }
    }

    /// Blocks until the next key, resize or tick.
    ///
    /// Keys do not push the deadline back, so steady typing cannot starve
    /// the refresh.
    pub fn next(&mut self) -> io::Result<Event> {
        loop {
            let remaining = self.next_tick.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.next_tick = Instant::now() + self.tick_rate;
                return Ok(Event::Tick);
            }

            match wait_outcome(event::poll(remaining))? {
                Wait::Ready => {}
                Wait::TimedOut => continue,
                // Let the loop check its shutdown flag without polling servers
                Wait::Interrupted => return Ok(Event::Wake),
            }

            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            }
        }
    }
}
