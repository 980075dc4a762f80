//! Column headers and body rows.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::model::Backend;
use crate::tui::style::Styles;
use crate::view::View;
use crate::view::rows::{BODY_TOP, HEADER_ROW, build_rows, column_offsets, visible_rows};

use super::put;

/// Renders the column headers and as many whole rows as `screen_height`
/// allows. Later columns overwrite any overflow of earlier ones.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    view: &View,
    backends: &[&Backend],
    tree: bool,
    screen_height: u16,
) {
    for (column, x) in view.columns.iter().zip(column_offsets(view)) {
        put(frame, area, x, HEADER_ROW, column.header, Styles::table_header());
    }

    let rows = build_rows(view, backends, tree, visible_rows(screen_height));
    for (i, row) in rows.iter().enumerate() {
        let y = BODY_TOP + i as u16;
        for cell in &row.cells {
            put(frame, area, cell.x, y, &cell.text, Styles::from_class(cell.style));
        }
    }
}
