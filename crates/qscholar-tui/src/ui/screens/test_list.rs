use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(area);

    render_test_list(frame, app, chunks[0]);
    render_test_detail(frame, app, chunks[1]);
}

fn render_test_list(frame: &mut Frame, app: &App, area: Rect) {
    let now = Utc::now();

    let items: Vec<ListItem> = app
        .tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let availability = test.availability(now);
            let style = if i == app.test_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<10}", format!("[{}]", availability)), styles::availability_style(availability)),
                Span::raw(" "),
                Span::raw(test.display_line()),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Tests Available ({}) ", app.tests.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if items.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No tests are available for this account",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.test_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_test_detail(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_test() {
        Some(test) => vec![
            Line::from(vec![
                Span::styled("Test:   ", styles::highlight_style()),
                Span::raw(test.name().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Start:  ", styles::highlight_style()),
                Span::raw(test.start_display().to_string()),
            ]),
            Line::from(vec![
                Span::styled("End:    ", styles::highlight_style()),
                Span::raw(test.end_display().to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", styles::help_key_style()),
                Span::styled(" Take Exam", styles::muted_style()),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Select a test from the list",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Selected ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
