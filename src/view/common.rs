//! UI-agnostic cell types.
//!
//! The TUI maps [`CellStyle`] to ratatui styles; nothing here knows about
//! colors.

/// Style classification of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStyle {
    #[default]
    Normal,
    /// Name column (TUI: cyan).
    Accent,
    /// Healthy status (TUI: green).
    Active,
    /// Any status other than "UP" (TUI: red).
    Critical,
}

/// A positioned piece of text inside a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCell {
    /// Column offset from the left edge of the screen.
    pub x: u16,
    pub text: String,
    pub style: CellStyle,
}

/// Whether a row shows a backend or one of its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Backend,
    Listener,
}

/// One body row ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub kind: RowKind,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    /// Text of the cell starting at `x`, if any.
    pub fn cell_at(&self, x: u16) -> Option<&ViewCell> {
        self.cells.iter().find(|c| c.x == x)
    }
}
