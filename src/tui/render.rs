//! Main rendering logic for TUI.
//!
//! Rendering is a pure function of the session state, the sorted display
//! list and the frame size. Every frame is drawn in full.

use chrono::NaiveTime;
use ratatui::Frame;
use ratatui::widgets::{Block, Borders};

use crate::provider::DisplayList;

use super::state::{AppState, InputMode};
use super::style::Styles;
use super::widgets::{
    render_filter_input, render_header, render_help, render_notice, render_sort_menu,
    render_table,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState, list: &DisplayList<'_>, clock: NaiveTime) {
    let area = frame.area();

    let border = Block::default().borders(Borders::ALL).style(Styles::default());
    let inner = border.inner(area);
    frame.render_widget(border, area);

    render_header(frame, inner, &list.counters, state.filter.as_ref(), clock);
    render_table(
        frame,
        inner,
        &state.view,
        &list.backends,
        state.tree,
        area.height,
    );

    // Overlays
    match state.input_mode {
        InputMode::Normal => {}
        InputMode::Help => render_help(frame, area),
        InputMode::SortMenu => render_sort_menu(frame, area, &state.view, &state.sort_menu),
        InputMode::FilterEntry => render_filter_input(frame, area, &state.filter_input),
    }

    if let Some(notice) = &state.notice {
        render_notice(frame, area, &notice.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockSource, backend};
    use crate::collector::{StatsError, StatsSource};
    use crate::provider::{Aggregator, Filter};
    use crate::tui::app::display_list;
    use crate::tui::state::{NOTICE_DURATION, Notice, SortMenuState};
    use crate::view::View;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::{Color, Modifier};

    fn clock() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap()
    }

    fn scenario() -> Aggregator {
        let sources: Vec<Box<dyn StatsSource>> = vec![
            Box::new(MockSource::new(
                "lb01:8404",
                vec![backend("A", "UP", "lb01:8404", &["L1"])],
            )),
            Box::new(MockSource::new(
                "lb02:8404",
                vec![backend("B", "DOWN", "lb02:8404", &[])],
            )),
        ];
        let mut aggregator = Aggregator::new(sources);
        aggregator.poll();
        aggregator
    }

    fn draw(aggregator: &Aggregator, state: &AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let list = display_list(aggregator, state);
        terminal
            .draw(|frame| render(frame, state, &list, clock()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    fn text_at(buf: &Buffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).map(|x| buf[(x, y)].symbol()).collect::<String>()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_end_to_end_scenario() {
        let aggregator = scenario();
        let state = AppState::new(View::realtime());
        let buf = draw(&aggregator, &state, 120, 24);

        let header = row_text(&buf, 1);
        assert_eq!(text_at(&buf, 2, 1, 12), "haproxytop -");
        assert!(header.contains("12:34:56"));
        assert!(header.contains("2 proxy 2 backends 1 listeners"));
        assert!(!header.contains("filter:"));

        assert_eq!(text_at(&buf, 2, 5, 2), "A ");
        assert_eq!(text_at(&buf, 2, 6, 5), "├ L1 ");
        assert_eq!(text_at(&buf, 2, 7, 2), "B ");
        assert!(row_text(&buf, 8).trim_matches(|c| c == ' ' || c == '│').is_empty());

        // STATUS column starts at x=32
        assert_eq!(buf[(32, 5)].symbol(), "U");
        assert_eq!(buf[(32, 5)].fg, Color::Green);
        assert_eq!(buf[(32, 7)].symbol(), "D");
        assert_eq!(buf[(32, 7)].fg, Color::Red);
        assert_eq!(buf[(2, 7)].fg, Color::Cyan);
    }

    #[test]
    fn test_column_headers_are_bold_at_offsets() {
        let aggregator = scenario();
        let state = AppState::new(View::realtime());
        let buf = draw(&aggregator, &state, 120, 24);

        for (header, x) in [("NAME", 2), ("STATUS", 32), ("SESSIONS", 39), ("PROXY", 97)] {
            assert_eq!(text_at(&buf, x, 3, header.len() as u16), header);
            assert!(buf[(x, 3)].modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_tree_off_and_reverse_sort() {
        let aggregator = scenario();
        let mut state = AppState::new(View::realtime());
        state.tree = false;
        state.sort_reversed = true;
        let buf = draw(&aggregator, &state, 120, 24);

        assert_eq!(text_at(&buf, 2, 5, 15), "B (0 listeners)");
        assert_eq!(text_at(&buf, 2, 6, 15), "A (1 listeners)");
        // Summary counts listeners whether or not they are shown
        assert!(row_text(&buf, 1).contains("2 proxy 2 backends 1 listeners"));
    }

    #[test]
    fn test_filter_shown_and_applied() {
        let aggregator = scenario();
        let state =
            AppState::new(View::realtime()).with_filter(Filter::parse("proxy:lb02").unwrap());
        let buf = draw(&aggregator, &state, 120, 24);

        let header = row_text(&buf, 1);
        assert_eq!(text_at(&buf, 65, 1, 18), "filter: proxy:lb02");
        assert!(header.contains("2 proxy 2 backends 1 listeners"));
        assert_eq!(text_at(&buf, 2, 5, 2), "B ");
        assert_eq!(text_at(&buf, 2, 6, 2), "  ");
    }

    #[test]
    fn test_unreachable_server_is_flagged() {
        let sources: Vec<Box<dyn StatsSource>> = vec![
            Box::new(MockSource::new(
                "lb01:8404",
                vec![backend("A", "UP", "lb01:8404", &["L1"])],
            )),
            Box::new(MockSource::failing(
                "lb02:8404",
                StatsError::Unreachable("connection refused".into()),
            )),
        ];
        let mut aggregator = Aggregator::new(sources);
        aggregator.poll();
        let state = AppState::new(View::realtime());
        let buf = draw(&aggregator, &state, 120, 24);

        // Counters start at x=26 and are 30 cells wide
        assert_eq!(
            text_at(&buf, 26, 1, 46),
            "2 proxy 1 backends 1 listeners (1 unreachable)"
        );
        assert_eq!(buf[(26, 1)].fg, Color::White);
        assert_eq!(buf[(58, 1)].fg, Color::Red);
    }

    #[test]
    fn test_rows_stop_at_usable_height() {
        let backends: Vec<_> = (0..20)
            .map(|i| backend(&format!("be{i:02}"), "UP", "lb01", &[]))
            .collect();
        let sources: Vec<Box<dyn StatsSource>> =
            vec![Box::new(MockSource::new("lb01", backends))];
        let mut aggregator = Aggregator::new(sources);
        aggregator.poll();
        let state = AppState::new(View::realtime());
        let buf = draw(&aggregator, &state, 120, 10);

        // Rows 5..=8 hold data, row 9 is the border
        assert_eq!(text_at(&buf, 2, 8, 4), "be03");
        assert!(!row_text(&buf, 9).contains("be04"));
    }

    #[test]
    fn test_tiny_terminals_do_not_panic() {
        let aggregator = scenario();
        let mut state = AppState::new(View::realtime());
        for (w, h) in [(0, 0), (1, 1), (3, 2), (10, 4), (20, 7)] {
            for mode in [
                InputMode::Normal,
                InputMode::Help,
                InputMode::SortMenu,
                InputMode::FilterEntry,
            ] {
                state.input_mode = mode;
                state.sort_menu = SortMenuState::open(&state.view, 0);
                state.notice = Some(Notice::new("Invalid filter", NOTICE_DURATION));
                let _ = draw(&aggregator, &state, w, h);
            }
        }
    }

    #[test]
    fn test_help_overlay() {
        let aggregator = scenario();
        let mut state = AppState::new(View::realtime());
        state.input_mode = InputMode::Help;
        let text = screen_text(&draw(&aggregator, &state, 120, 24));

        assert!(text.contains(&format!("haproxytop version {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("t - tree"));
        assert!(text.contains("s - select sort field"));
        assert!(text.contains("(e.g. proxy:lb01)"));
        assert!(text.contains("q - quit"));
    }

    #[test]
    fn test_sort_menu_lists_sortable_columns_only() {
        let aggregator = scenario();
        let mut state = AppState::new(View::realtime());
        state.sort_menu = SortMenuState::open(&state.view, 2);
        state.input_mode = InputMode::SortMenu;
        let buf = draw(&aggregator, &state, 120, 24);
        let text = screen_text(&buf);

        assert!(text.contains("Sort by"));
        assert!(text.contains(" SESSIONS "));
        // CRQ TIME exists only as a column header, not as a menu option
        assert_eq!(text.matches("CRQ TIME").count(), 1);
    }

    #[test]
    fn test_filter_box_and_notice() {
        let aggregator = scenario();
        let mut state = AppState::new(View::realtime());
        state.input_mode = InputMode::FilterEntry;
        state.filter_input = "name:we".into();
        let text = screen_text(&draw(&aggregator, &state, 120, 24));
        assert!(text.contains("String to filter for:"));
        assert!(text.contains("name:we_"));

        state.input_mode = InputMode::Normal;
        state.notice = Some(Notice::new("Invalid filter", NOTICE_DURATION));
        let buf = draw(&aggregator, &state, 120, 24);
        let text = screen_text(&buf);
        assert!(text.contains("Invalid filter"));
    }
}
