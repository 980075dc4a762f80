//! Sort field menu.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::SortMenuState;
use crate::tui::style::Styles;
use crate::view::View;

const ANCHOR_Y: u16 = 6;
const MIN_WIDTH: u16 = 16;

/// Renders the menu anchored left of the screen center, clamped into `area`.
pub fn render_sort_menu(frame: &mut Frame, area: Rect, view: &View, menu: &SortMenuState) {
    let labels: Vec<&str> = menu
        .options
        .iter()
        .filter_map(|&i| view.columns.get(i).map(|c| c.header))
        .collect();

    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
    let width = (label_width + 4).max(MIN_WIDTH).min(area.width);
    let height = (labels.len() as u16 + 2).min(area.height);
    let x = (area.width / 2)
        .saturating_sub(20)
        .min(area.right().saturating_sub(width));
    let y = ANCHOR_Y.min(area.bottom().saturating_sub(height));
    let popup_area = Rect::new(x, y, width, height).intersection(area);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(" Sort by ")
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines: Vec<Line> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let text = format!(" {:<w$} ", label, w = label_width as usize);
            if i == menu.selected {
                Line::from(Span::styled(text, Styles::selected()))
            } else {
                Line::from(Span::raw(text))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Styles::default()), inner);
}
