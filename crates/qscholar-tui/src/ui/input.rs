//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_birthdate_char, can_add_email_char, App, AppState, LoginFocus, Screen,
    PAGE_SCROLL_SIZE,
};

use super::render::max_scroll;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl+C leaves at once, except while a test is open
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if app.screen.is_fullscreen() {
            app.alert = None;
            app.request_quit();
            return Ok(false);
        }
        app.state = AppState::Quitting;
        return Ok(true);
    }

    // A message box swallows the next key
    if app.alert.is_some() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        ) {
            app.alert = None;
        }
        return Ok(false);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.screen {
        Screen::Login => handle_login_input(app, key).await,
        Screen::Tests => handle_tests_input(app, key).await,
        Screen::Instructions => handle_instructions_input(app, key).await,
        Screen::Exam => handle_exam_input(app, key),
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = app.login_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = app.login_focus.prev();
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => {
                app.login_focus = LoginFocus::Birthdate;
            }
            LoginFocus::Birthdate => {
                app.login_focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                // On failure login_error is set and we stay here
                let _ = app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Birthdate => {
                app.login_birthdate.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if can_add_email_char(app.login_email.chars().count(), c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Birthdate => {
                if can_add_birthdate_char(app.login_birthdate.len(), c) {
                    app.login_birthdate.push(c);
                }
            }
            LoginFocus::Button => {
                // Ignore character input on button
            }
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_tests_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Enter | KeyCode::Char('t') => app.take_selected_exam().await,
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
    Ok(false)
}

async fn handle_instructions_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => app.start_exam().await,
        _ => return handle_reading_keys(app, key),
    }
    Ok(false)
}

fn handle_exam_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    handle_reading_keys(app, key)
}

/// Scrolling, help and guarded quit shared by the full-screen views
fn handle_reading_keys(app: &mut App, key: KeyEvent) -> Result<bool> {
    let page = PAGE_SCROLL_SIZE as u16;
    let max = max_scroll(app);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1, max),
        KeyCode::PageUp => app.scroll_up(page),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(page, max),
        _ => {}
    }
    Ok(false)
}
