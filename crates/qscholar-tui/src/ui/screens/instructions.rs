use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area)
}

fn instructions_text(app: &App) -> &str {
    app.attempt
        .as_ref()
        .map(|a| a.instructions.as_str())
        .unwrap_or("")
}

/// Largest scroll offset that still keeps text in the view
pub fn max_scroll(app: &App, area: Rect) -> u16 {
    let inner = Block::default().borders(Borders::ALL).inner(split(area)[0]);
    let total = Paragraph::new(instructions_text(app))
        .wrap(Wrap { trim: false })
        .line_count(inner.width);
    u16::try_from(total).unwrap_or(u16::MAX).saturating_sub(inner.height)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = split(area);

    let title = match app.attempt {
        Some(ref attempt) => format!(" Instructions - Test {} ", attempt.test_id),
        None => " Instructions ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(instructions_text(app))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.instructions_scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    let button = Paragraph::new(Line::from(vec![
        Span::raw("  ["),
        Span::styled("  ▶ Start Test  ", styles::button_style(true)),
        Span::raw("]   "),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" start  ", styles::muted_style()),
        Span::styled("↑/↓", styles::help_key_style()),
        Span::styled(" scroll  ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" help", styles::muted_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(button, chunks[1]);
}
