//! Help popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::centered;

/// Key bindings listed in the popup, with an example after the filter key.
const BINDINGS: &[(&str, &str)] = &[
    ("t", "tree"),
    ("s", "select sort field"),
    ("r", "reverse sort order"),
    ("f", "filter by name or proxy"),
    ("", "(e.g. proxy:lb01)"),
    ("h", "show this help dialog"),
    ("q", "quit"),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("haproxytop version {}", env!("CARGO_PKG_VERSION")),
            Styles::table_header(),
        )),
        Line::from(""),
    ];
    for (key, text) in BINDINGS {
        if key.is_empty() {
            lines.push(Line::from(Span::styled(format!("    {text}"), Styles::dim())));
        } else {
            lines.push(Line::from(vec![
                Span::styled(*key, Styles::help_key()),
                Span::raw(format!(" - {text}")),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press any key to close", Styles::dim())));
    lines
}

/// Renders the help popup centered on screen.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let lines = help_lines();
    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;
    let popup_area = centered(area, width, height);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: inner.x.saturating_add(1).min(inner.right()),
        width: inner.width.saturating_sub(1),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines).style(Styles::default()), inner);
}
