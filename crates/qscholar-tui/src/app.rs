//! Application state management for the test portal client.
//!
//! This module contains the core `App` struct that owns the session, the API
//! client and all UI state, and drives the screen flow:
//! login, test list, instructions, exam.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use ratatui::layout::Rect;
use tracing::{debug, error, info, warn};

use qscholar_core::api::is_unauthorized;
use qscholar_core::models::{Attempt, Availability, Birthdate, ExamLaunch, Test};
use qscholar_core::{ApiClient, ApiError, Config, Session, SessionData};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Birthdate input is `DD-MM-YYYY`.
const MAX_BIRTHDATE_LENGTH: usize = 10;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Shown on the login screen after the backend rejects the stored token
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

// ============================================================================
// UI State Types
// ============================================================================

/// Which step of the portal flow is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Tests,
    Instructions,
    Exam,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Tests => "Tests Available",
            Screen::Instructions => "Instructions",
            Screen::Exam => "Test",
        }
    }

    /// Instructions and the exam itself take over the whole terminal
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, Screen::Instructions | Screen::Exam)
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Email,
    Birthdate,
    Button,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Birthdate,
            LoginFocus::Birthdate => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Button,
            LoginFocus::Birthdate => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Birthdate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Error,
}

/// Modal message box; dismissed by the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    config_path: Option<PathBuf>,
    pub session: Session,
    pub api: ApiClient,

    // UI State
    pub state: AppState,
    pub screen: Screen,
    pub alert: Option<Alert>,
    pub status_message: Option<String>,

    // Login form state
    pub login_email: String,
    pub login_birthdate: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Logged-in candidate
    pub email: String,
    pub tests: Vec<Test>,
    pub test_selection: usize,

    // Current attempt
    pub attempt: Option<Attempt>,
    pub instructions_scroll: u16,
    pub launch: Option<ExamLaunch>,
    pub exam_scroll: u16,

    /// Terminal area of the last drawn frame
    pub viewport: Rect,
}

impl App {
    /// Create a new application instance from the user's config and token file
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        });
        let config_path = Config::default_path().ok();

        let endpoints = config.endpoints();
        info!(base_url = %endpoints.base_url, "Backend configured");

        let mut session = Session::new(Session::default_path()?);
        match session.load() {
            Ok(found) => debug!(found, "Token file checked"),
            Err(e) => warn!(error = %e, "Ignoring unreadable token file"),
        }

        let api = ApiClient::new(endpoints)?;
        Ok(Self::with_parts(config, config_path, session, api))
    }

    /// Assemble an app from already-loaded parts.
    /// `config_path` of `None` keeps the config in memory only.
    pub fn with_parts(
        config: Config,
        config_path: Option<PathBuf>,
        session: Session,
        api: ApiClient,
    ) -> Self {
        let login_email = session
            .email()
            .map(str::to_string)
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        let mut app = Self {
            config,
            config_path,
            session,
            api,

            state: AppState::Normal,
            screen: Screen::Login,
            alert: None,
            status_message: None,

            login_email,
            login_birthdate: String::new(),
            login_focus: LoginFocus::Email,
            login_error: None,

            email: String::new(),
            tests: Vec::new(),
            test_selection: 0,

            attempt: None,
            instructions_scroll: 0,
            launch: None,
            exam_scroll: 0,

            viewport: Rect::new(0, 0, 80, 24),
        };
        app.start_login(None);
        app
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Show the login screen, optionally with a message in the error slot
    pub fn start_login(&mut self, message: Option<String>) {
        self.screen = Screen::Login;
        self.state = AppState::Normal;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Birthdate
        };
        self.login_birthdate.clear();
        self.login_error = message;
    }

    /// Attempt login with the email and birthdate from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let email = self.login_email.trim().to_string();
        if email.is_empty() {
            self.login_error = Some("Email is required".to_string());
            return Err(anyhow::anyhow!("Email is required"));
        }
        let birthdate = match Birthdate::parse_input(&self.login_birthdate) {
            Ok(b) => b,
            Err(e) => {
                self.login_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.login_error = None;

        match self.api.login(&email, &birthdate).await {
            Ok(result) => {
                self.session.update(SessionData::new(result.token, &email));
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save token file");
                }

                self.config.last_email = Some(email.clone());
                self.save_config();

                info!(test_count = result.tests.len(), "Login successful");
                self.email = email;
                self.tests = result.tests;
                self.test_selection = 0;
                self.login_birthdate.clear();
                self.screen = Screen::Tests;
                self.status_message = Some(format!("Logged in as {}", self.email));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(format!("Login Failed: {}", describe_error(&e)));
                Err(e)
            }
        }
    }

    /// Drop the session and return to the login screen
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to remove token file");
        }
        self.reset_candidate_state();
        info!("Logged out");
        self.start_login(None);
    }

    /// The backend no longer accepts our token
    fn expire_session(&mut self) {
        warn!("Token rejected by backend, clearing session");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to remove token file");
        }
        self.reset_candidate_state();
        self.start_login(Some(SESSION_EXPIRED_MESSAGE.to_string()));
    }

    fn reset_candidate_state(&mut self) {
        self.tests.clear();
        self.test_selection = 0;
        self.attempt = None;
        self.instructions_scroll = 0;
        self.launch = None;
        self.exam_scroll = 0;
        self.alert = None;
        self.status_message = None;
    }

    fn save_config(&self) {
        if let Some(ref path) = self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "Failed to save config");
            }
        }
    }

    // =========================================================================
    // Test list
    // =========================================================================

    pub fn selected_test(&self) -> Option<&Test> {
        self.tests.get(self.test_selection)
    }

    pub fn select_next(&mut self) {
        if self.test_selection + 1 < self.tests.len() {
            self.test_selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.test_selection = self.test_selection.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.test_selection = 0;
    }

    pub fn select_last(&mut self) {
        self.test_selection = self.tests.len().saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let last = self.tests.len().saturating_sub(1);
        self.test_selection = (self.test_selection + PAGE_SCROLL_SIZE).min(last);
    }

    pub fn page_up(&mut self) {
        self.test_selection = self.test_selection.saturating_sub(PAGE_SCROLL_SIZE);
    }

    /// Number of tests whose window is open right now
    pub fn open_test_count(&self) -> usize {
        let now = Utc::now();
        self.tests
            .iter()
            .filter(|t| t.availability(now) == Availability::Open)
            .count()
    }

    /// Initialise an attempt for the highlighted test and show its instructions
    pub async fn take_selected_exam(&mut self) {
        let Some(test_id) = self.selected_test().and_then(|t| t.test_id) else {
            self.alert = Some(Alert::warning(
                "No Test Selected",
                "Please select a test to take.",
            ));
            return;
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            self.expire_session();
            return;
        };

        match self.api.init_test(&self.email, &token, test_id).await {
            Ok(attempt) => {
                self.attempt = Some(attempt);
                self.instructions_scroll = 0;
                self.status_message = None;
                self.screen = Screen::Instructions;
            }
            Err(e) if is_unauthorized(&e) => self.expire_session(),
            Err(e) => {
                error!(error = %e, test_id, "Attempt initialisation failed");
                self.alert = Some(Alert::error("Exam Start Failed", describe_error(&e)));
            }
        }
    }

    // =========================================================================
    // Instructions and exam
    // =========================================================================

    /// Start the initialised attempt and switch to the exam view
    pub async fn start_exam(&mut self) {
        let Some(attempt) = self.attempt.clone() else {
            warn!("Start requested without an attempt");
            self.screen = Screen::Tests;
            return;
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            self.expire_session();
            return;
        };

        match self.api.start_test(&self.email, &token, &attempt).await {
            Ok(launch) => {
                self.launch = Some(launch);
                self.exam_scroll = 0;
                self.screen = Screen::Exam;
            }
            Err(e) if is_unauthorized(&e) => self.expire_session(),
            Err(e) => {
                error!(error = %e, attempt_id = attempt.attempt_id, "Test start failed");
                self.alert = Some(Alert::error("Start Test Failed", describe_error(&e)));
            }
        }
    }

    /// Scroll forward, never past `max` (the last line reaching the bottom)
    pub fn scroll_down(&mut self, lines: u16, max: u16) {
        let scroll = self.current_scroll_mut();
        *scroll = scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let scroll = self.current_scroll_mut();
        *scroll = scroll.saturating_sub(lines);
    }

    fn current_scroll_mut(&mut self) -> &mut u16 {
        match self.screen {
            Screen::Exam => &mut self.exam_scroll,
            _ => &mut self.instructions_scroll,
        }
    }

    /// Pretty-printed question payload for the exam view
    pub fn question_text(&self) -> String {
        self.launch
            .as_ref()
            .map(|l| {
                serde_json::to_string_pretty(&l.question_json)
                    .unwrap_or_else(|_| l.question_json.to_string())
            })
            .unwrap_or_default()
    }

    pub fn request_quit(&mut self) {
        self.state = AppState::ConfirmingQuit;
    }
}

/// Candidate-facing text for an error from the API layer
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => api_err.user_message(),
        None => err.to_string(),
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

/// Check if a birthdate character should be accepted (digits and dashes only)
pub fn can_add_birthdate_char(current_len: usize, c: char) -> bool {
    current_len < MAX_BIRTHDATE_LENGTH && (c.is_ascii_digit() || c == '-')
}

// ============================================================================
// Tests
// ============================================================================
