use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area)
}

/// Largest scroll offset that still keeps questions in the view
pub fn max_scroll(app: &App, area: Rect) -> u16 {
    let inner = Block::default().borders(Borders::ALL).inner(split(area)[1]);
    let total = Paragraph::new(app.question_text()).line_count(inner.width);
    u16::try_from(total).unwrap_or(u16::MAX).saturating_sub(inner.height)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = split(area);

    let header = match app.launch {
        Some(ref launch) => {
            let mut spans = vec![Span::styled(
                format!("Test ID: {} | Attempt ID: {}", launch.test_id, launch.attempt_id),
                styles::title_style(),
            )];
            if let Some(count) = launch.question_count() {
                spans.push(Span::styled(
                    format!("   {} questions", count),
                    styles::highlight_style(),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled("No test in progress", styles::muted_style())),
    };

    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

    let block = Block::default()
        .title(" Questions ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(app.question_text())
        .block(block)
        .scroll((app.exam_scroll, 0));
    frame.render_widget(paragraph, chunks[1]);
}
