//! TUI widgets for haproxytop.

mod filter_input;
mod header;
mod help;
mod notice;
mod sort_menu;
mod table;

pub use filter_input::render_filter_input;
pub use header::render_header;
pub use help::render_help;
pub use notice::render_notice;
pub use sort_menu::render_sort_menu;
pub use table::render_table;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Writes `text` at absolute `(x, y)`, clipped to `area`.
///
/// Returns the x right after the written text.
pub(crate) fn put(frame: &mut Frame, area: Rect, x: u16, y: u16, text: &str, style: Style) -> u16 {
    if y < area.top() || y >= area.bottom() || x < area.left() || x >= area.right() {
        return x;
    }
    let max_width = (area.right() - x) as usize;
    let (end, _) = frame.buffer_mut().set_stringn(x, y, text, max_width, style);
    end
}

/// Centers a `width` x `height` popup in `area`, shrinking it to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
