//! Transient notice box.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::centered;

pub fn render_notice(frame: &mut Frame, area: Rect, text: &str) {
    let popup_area = centered(area, text.chars().count() as u16 + 6, 3);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let paragraph = Paragraph::new(text)
        .style(Styles::notice())
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup_area);
}
