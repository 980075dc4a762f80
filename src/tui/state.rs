//! Session state: everything the keyboard can change.
//!
//! One `AppState` lives for the whole process. The aggregator, sorter and
//! renderer only read it, once per tick.

use std::time::{Duration, Instant};

use crate::provider::Filter;
use crate::view::View;

/// How long the "Invalid filter" notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);
/// Width of the filter input box; the input is capped one below it.
pub const FILTER_INPUT_WIDTH: u16 = 30;

/// Which screen the keyboard currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Live table.
    #[default]
    Normal,
    /// Help popup, closed by any key.
    Help,
    /// Sort field menu.
    SortMenu,
    /// Filter text entry.
    FilterEntry,
}

impl InputMode {
    pub fn is_modal(&self) -> bool {
        !matches!(self, InputMode::Normal)
    }
}

/// Cursor over the sortable columns of the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortMenuState {
    /// Column indices offered, in view order.
    pub options: Vec<usize>,
    /// Position of the cursor within `options`.
    pub selected: usize,
}

impl SortMenuState {
    /// Opens on the currently active sort column.
    pub fn open(view: &View, current: usize) -> Self {
        let options = view.sortable_columns();
        let selected = options.iter().position(|&c| c == current).unwrap_or(0);
        Self { options, selected }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    /// Column index under the cursor.
    pub fn chosen(&self) -> Option<usize> {
        self.options.get(self.selected).copied()
    }
}

/// Short-lived message drawn over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub until: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            until: Instant::now() + duration,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }
}

/// Mutable session state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active view (its name is `view.name`).
    pub view: View,
    /// Show listener rows under their backend.
    pub tree: bool,
    pub filter: Option<Filter>,
    /// Column index of the active sort.
    pub sort_column: usize,
    pub sort_reversed: bool,
    pub input_mode: InputMode,
    pub sort_menu: SortMenuState,
    /// Text typed into the filter box.
    pub filter_input: String,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(view: View) -> Self {
        let sort_column = view.default_sort_column();
        Self {
            view,
            tree: true,
            filter: None,
            sort_column,
            sort_reversed: false,
            input_mode: InputMode::Normal,
            sort_menu: SortMenuState::default(),
            filter_input: String::new(),
            notice: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    /// Header of the active sort column.
    pub fn sort_header(&self) -> &'static str {
        self.view
            .columns
            .get(self.sort_column)
            .map(|c| c.header)
            .unwrap_or("")
    }

    /// Drops the notice once its time is up.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| !n.is_active(now)) {
            self.notice = None;
        }
    }
}
