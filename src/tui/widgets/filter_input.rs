//! Filter entry popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::FILTER_INPUT_WIDTH;
use crate::tui::style::Styles;

use super::centered;

const PROMPT: &str = "String to filter for:";

/// Renders the prompt and a fixed-width input box holding `input`.
pub fn render_filter_input(frame: &mut Frame, area: Rect, input: &str) {
    let popup_area = centered(area, FILTER_INPUT_WIDTH + 4, 6);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(" Filter ")
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Trailing underscore marks the cursor; the box is padded to full width.
    let field = format!("{input}_");
    let field = format!("{:<w$}", field, w = FILTER_INPUT_WIDTH as usize);
    let lines = vec![
        Line::from(format!(" {PROMPT}")),
        Line::from(""),
        Line::from(vec![Span::raw(" "), Span::styled(field, Styles::filter_input())]),
        Line::from(Span::styled(" Enter apply  Esc cancel", Styles::dim())),
    ];
    frame.render_widget(Paragraph::new(lines).style(Styles::default()), inner);
}
