use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use qscholar_core::utils::truncate_string;

use crate::app::{AlertKind, App, AppState, Screen};

use super::screens::{exam, instructions, login, test_list};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    if app.screen.is_fullscreen() {
        render_main_content(frame, app, frame.area());
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(10),   // Main content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        render_title_bar(frame, app, chunks[0]);
        render_main_content(frame, app, chunks[1]);
        render_status_bar(frame, app, chunks[2]);
    }

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame, app);
    }

    if let Some(ref alert) = app.alert {
        render_alert_overlay(frame, alert.kind, &alert.title, &alert.message);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  Quantum Scholar - AI Proctored Exams ({})", app.screen.title());
    let help_hint = if app.screen == Screen::Login { "" } else { "[?] Help" };

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::Login => login::render(frame, app, area),
        Screen::Tests => test_list::render(frame, app, area),
        Screen::Instructions => instructions::render(frame, app, area),
        Screen::Exam => exam::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.screen {
        Screen::Tests => "[Enter] take exam | [L]ogout | [q]uit",
        _ => "[Esc] quit",
    };

    let left_text = match (&app.status_message, app.screen) {
        (Some(msg), _) => format!(" {} ", truncate_string(msg, (area.width as usize) / 2)),
        (None, Screen::Tests) => format!(" {} open now ", app.open_test_count()),
        (None, _) => format!(" {} ", app.api.endpoints().base_url),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let mut help_text = vec![
        Line::from(Span::styled("  Keyboard Shortcuts", styles::title_style())),
        Line::from(""),
    ];

    match app.screen {
        Screen::Login => {
            help_text.push(help_line("Tab / ↓", "Next field"));
            help_text.push(help_line("Enter", "Continue / Login"));
            help_text.push(help_line("Esc", "Quit"));
        }
        Screen::Tests => {
            help_text.push(help_line("↑/↓ j/k", "Move selection"));
            help_text.push(help_line("PgUp/PgDn", "Move by page"));
            help_text.push(help_line("Home/End", "First / last test"));
            help_text.push(help_line("Enter / t", "Take exam"));
            help_text.push(help_line("L", "Log out"));
            help_text.push(help_line("q", "Quit"));
        }
        Screen::Instructions => {
            help_text.push(help_line("↑/↓", "Scroll instructions"));
            help_text.push(help_line("PgUp/PgDn", "Scroll by page"));
            help_text.push(help_line("Enter / s", "Start test"));
            help_text.push(help_line("q", "Quit"));
        }
        Screen::Exam => {
            help_text.push(help_line("↑/↓", "Scroll questions"));
            help_text.push(help_line("PgUp/PgDn", "Scroll by page"));
            help_text.push(help_line("q", "Quit"));
        }
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("  Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let area = centered_rect_fixed(46, help_text.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Scroll limit for the current reading view, sized to the last drawn frame
pub fn max_scroll(app: &App) -> u16 {
    match app.screen {
        Screen::Instructions => instructions::max_scroll(app, app.viewport),
        Screen::Exam => exam::max_scroll(app, app.viewport),
        Screen::Login | Screen::Tests => 0,
    }
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(50, 8, frame.area());
    frame.render_widget(Clear, area);

    let warning = if app.screen == Screen::Exam {
        "   Your test is in progress."
    } else {
        ""
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(Span::styled(warning, styles::error_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_alert_overlay(frame: &mut Frame, kind: AlertKind, title: &str, message: &str) {
    let area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let message_style = match kind {
        AlertKind::Warning => styles::highlight_style(),
        AlertKind::Error => styles::error_style(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {}", message), message_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("Enter", styles::help_key_style()),
            Span::styled(" to continue", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(message_style)
        .borders(Borders::ALL)
        .border_style(message_style)
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
