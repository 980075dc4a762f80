//! Summary line: product name, clock, counters and active filter.

use chrono::NaiveTime;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::model::Counters;
use crate::provider::Filter;
use crate::tui::style::Styles;
use crate::view::rows::{START_COL, SUMMARY_ROW};

use super::put;

const TITLE: &str = "haproxytop -";
const CLOCK_COL: u16 = 15;
const COUNTERS_COL: u16 = 26;
/// Leftmost column of the filter label; pushed right by long counters.
const FILTER_COL: u16 = 65;

/// Renders the summary line.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    counters: &Counters,
    filter: Option<&Filter>,
    clock: NaiveTime,
) {
    let y = SUMMARY_ROW;
    put(frame, area, START_COL, y, TITLE, Styles::default());
    put(
        frame,
        area,
        CLOCK_COL,
        y,
        &clock.format("%H:%M:%S").to_string(),
        Styles::default(),
    );

    let totals = counters.totals();
    let mut end = COUNTERS_COL.saturating_add(totals.chars().count() as u16);
    put(frame, area, COUNTERS_COL, y, &totals, Styles::default());
    if let Some(flag) = counters.unreachable_flag() {
        let x = end;
        end = end.saturating_add(flag.chars().count() as u16);
        put(frame, area, x, y, &flag, Styles::critical());
    }

    if let Some(filter) = filter {
        let x = FILTER_COL.max(end.saturating_add(2));
        put(frame, area, x, y, &format!("filter: {filter}"), Styles::default());
    }
}
