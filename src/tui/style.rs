//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::CellStyle;

/// Terminal palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const NAME: Color = Color::Cyan;
    pub const STATUS_OK: Color = Color::Green;
    pub const STATUS_BAD: Color = Color::Red;
    pub const NOTICE: Color = Color::Yellow;
    pub const BORDER: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Column header style.
    pub fn table_header() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Name column style.
    pub fn name() -> Style {
        Style::default().fg(Theme::NAME)
    }

    /// Status "UP".
    pub fn status_ok() -> Style {
        Style::default().fg(Theme::STATUS_OK)
    }

    /// Any other status, and unreachable servers.
    pub fn critical() -> Style {
        Style::default().fg(Theme::STATUS_BAD)
    }

    /// Highlighted menu entry.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed hint text.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Transient notice text.
    pub fn notice() -> Style {
        Style::default()
            .fg(Theme::NOTICE)
            .add_modifier(Modifier::BOLD)
    }

    /// Popup border.
    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    /// Filter input text.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Key names in the help popup.
    pub fn help_key() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`CellStyle`] to a ratatui [`Style`].
    pub fn from_class(class: CellStyle) -> Style {
        match class {
            CellStyle::Normal => Style::default(),
            CellStyle::Accent => Self::name(),
            CellStyle::Active => Self::status_ok(),
            CellStyle::Critical => Self::critical(),
        }
    }
}
