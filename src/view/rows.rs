//! Body row layout: tree expansion, truncation and cell coloring.
//!
//! Screen geometry (all zero-based):
//!
//! ```text
//! row 0   border
//! row 1   haproxytop - HH:MM:SS  <counters>  filter: ...
//! row 3   column headers
//! row 5.. one row per backend (+ listeners when tree-expand is on)
//! h-2     last usable body row
//! h-1     border
//! ```

use crate::fmt::truncate;
use crate::model::Backend;

use super::common::{CellStyle, RowKind, ViewCell, ViewRow};
use super::{Column, ColumnKind, Record, View};

/// Left margin of the header line and of every column.
pub const START_COL: u16 = 2;
/// Row of the summary header line.
pub const SUMMARY_ROW: u16 = 1;
/// Row of the column headers.
pub const HEADER_ROW: u16 = 3;
/// First body row.
pub const BODY_TOP: u16 = 5;
/// Rows kept free below the body.
pub const BOTTOM_MARGIN: u16 = 1;
/// Prefix of listener names in tree mode.
pub const TREE_GLYPH: &str = "├ ";
/// Status value rendered as healthy.
pub const STATUS_UP: &str = "UP";

/// Number of whole body rows that fit a terminal of `height` rows.
pub fn visible_rows(height: u16) -> usize {
    let last = height.saturating_sub(BOTTOM_MARGIN + 1);
    if last < BODY_TOP {
        0
    } else {
        (last - BODY_TOP + 1) as usize
    }
}

/// X offset of every column: the left margin plus preceding widths.
pub fn column_offsets(view: &View) -> Vec<u16> {
    view.columns
        .iter()
        .scan(START_COL, |x, c| {
            let at = *x;
            *x = x.saturating_add(c.width);
            Some(at)
        })
        .collect()
}

/// Builds at most `max_rows` body rows for the sorted, filtered backends.
///
/// With `tree` on, each backend row is followed by one row per listener.
/// With `tree` off, listener rows are suppressed and the backend name gets
/// a listener count instead. Rows are cut whole once `max_rows` is reached.
pub fn build_rows(view: &View, backends: &[&Backend], tree: bool, max_rows: usize) -> Vec<ViewRow> {
    let offsets = column_offsets(view);
    let mut rows = Vec::new();

    for backend in backends {
        if rows.len() >= max_rows {
            break;
        }
        let suffix = (!tree).then(|| format!(" ({} listeners)", backend.listeners.len()));
        rows.push(build_row(
            view,
            &offsets,
            Record::backend(backend),
            RowKind::Backend,
            None,
            suffix.as_deref(),
        ));

        if !tree {
            continue;
        }
        for listener in &backend.listeners {
            if rows.len() >= max_rows {
                break;
            }
            rows.push(build_row(
                view,
                &offsets,
                Record::listener(listener),
                RowKind::Listener,
                Some(TREE_GLYPH),
                None,
            ));
        }
    }

    rows
}

/// Lays out one row. `name_prefix` is added before truncation, `name_suffix`
/// after it.
fn build_row(
    view: &View,
    offsets: &[u16],
    rec: Record<'_>,
    kind: RowKind,
    name_prefix: Option<&str>,
    name_suffix: Option<&str>,
) -> ViewRow {
    let cells = view
        .columns
        .iter()
        .zip(offsets)
        .map(|(column, &x)| {
            let mut text = column.value(rec);
            if column.kind == ColumnKind::Name
                && let Some(prefix) = name_prefix
            {
                text.insert_str(0, prefix);
            }
            let mut text = truncate(&text, column.width as usize);
            if column.kind == ColumnKind::Name
                && let Some(suffix) = name_suffix
            {
                text.push_str(suffix);
            }
            ViewCell {
                x,
                style: cell_style(column, &text),
                text,
            }
        })
        .collect();

    ViewRow { kind, cells }
}

fn cell_style(column: &Column, text: &str) -> CellStyle {
    match column.kind {
        ColumnKind::Name => CellStyle::Accent,
        ColumnKind::Status if text == STATUS_UP => CellStyle::Active,
        ColumnKind::Status => CellStyle::Critical,
        ColumnKind::Plain => CellStyle::Normal,
    }
}
