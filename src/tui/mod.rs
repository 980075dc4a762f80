//! Terminal user interface for haproxytop.
//!
//! Owns the refresh loop: poll every server, filter and sort the result,
//! draw it, then wait one tick for a key.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::{App, TerminalGuard, install_panic_hook, restore};
pub use input::{KeyAction, handle_key};
pub use state::{AppState, InputMode};
