use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Visible width of the input fields
const FIELD_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.login_error.is_some() { 15 } else { 13 };
    let area = centered_rect_fixed(56, height, area);

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "   Welcome to Quantum Scholar - AI Proctored Exams!",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    lines.push(field_line(
        "Email:     ",
        &tail(&app.login_email, FIELD_WIDTH),
        app.login_focus == LoginFocus::Email,
    ));

    let birthdate = if app.login_birthdate.is_empty() && app.login_focus != LoginFocus::Birthdate {
        "DD-MM-YYYY".to_string()
    } else {
        app.login_birthdate.clone()
    };
    lines.push(field_line(
        "Birthdate: ",
        &birthdate,
        app.login_focus == LoginFocus::Birthdate,
    ));

    lines.push(Line::from(""));
    let button_focused = app.login_focus == LoginFocus::Button;
    let label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(vec![
        Span::raw("                     ["),
        Span::styled(label, styles::button_style(button_focused)),
        Span::raw("]"),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Tab", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" continue  ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" quit", styles::muted_style()),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(" Login ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn field_line(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(label, styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", value, cursor, width = FIELD_WIDTH),
            styles::button_style(focused),
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

/// Keep the end of long input visible, where the cursor is
fn tail(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        s.to_string()
    } else {
        s.chars().skip(count - max_chars).collect()
    }
}
