//! API client for communicating with the test portal backend.
//!
//! This module provides the `ApiClient` struct for the login, attempt
//! initialisation and test start calls.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::config::Endpoints;
use crate::models::{
    Attempt, Birthdate, ExamLaunch, InitTestRequest, InitTestResponse, LoginRequest,
    LoginResponse, LoginResult, StartTestRequest, StartTestResponse,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default HTTP request timeout in seconds, used by login.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Timeout for attempt initialisation.
const INIT_TEST_TIMEOUT_SECS: u64 = 10;

/// Timeout for starting a test.
const START_TEST_TIMEOUT_SECS: u64 = 15;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for the test portal.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
    initial_backoff: Duration,
}

impl ApiClient {
    /// Create a new API client for the given backend
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoints,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Override the first rate-limit backoff step; doubles on each retry
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Authenticate with email and birthdate.
    /// Success requires both a token and a tests list in the reply.
    pub async fn login(&self, email: &str, birthdate: &Birthdate) -> Result<LoginResult> {
        let body = LoginRequest {
            email,
            birthdate: birthdate.to_wire(),
        };

        let response: LoginResponse = self
            .post(&self.endpoints.login, &body, None)
            .await
            .context("Login request failed")?;

        match (response.token, response.tests) {
            (Some(token), Some(tests)) => {
                info!(test_count = tests.len(), "Login accepted");
                Ok(LoginResult { token, tests })
            }
            _ => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string());
                warn!(%message, "Login reply missing token or tests");
                Err(ApiError::InvalidResponse(message).into())
            }
        }
    }

    /// Initialise an attempt for a test and fetch its instructions
    pub async fn init_test(&self, email: &str, token: &str, test_id: i64) -> Result<Attempt> {
        let body = InitTestRequest {
            email,
            token,
            test_id,
        };

        let response: InitTestResponse = self
            .post(
                &self.endpoints.init_test,
                &body,
                Some(Duration::from_secs(INIT_TEST_TIMEOUT_SECS)),
            )
            .await
            .with_context(|| format!("Failed to initialise test {}", test_id))?;

        let instructions = response.instructions_text();
        let attempt_id = response.attempt_id.ok_or_else(|| {
            ApiError::InvalidResponse("Missing attempt_id in response.".to_string())
        })?;

        info!(test_id, attempt_id, "Attempt initialised");
        Ok(Attempt {
            test_id,
            attempt_id,
            instructions,
        })
    }

    /// Start an initialised attempt and receive the question payload
    pub async fn start_test(&self, email: &str, token: &str, attempt: &Attempt) -> Result<ExamLaunch> {
        let body = StartTestRequest {
            email,
            token,
            test_id: attempt.test_id,
            attempt_id: attempt.attempt_id,
        };

        let response: StartTestResponse = self
            .post(
                &self.endpoints.start_test,
                &body,
                Some(Duration::from_secs(START_TEST_TIMEOUT_SECS)),
            )
            .await
            .with_context(|| format!("Failed to start attempt {}", attempt.attempt_id))?;

        let question_json = response.question_json.ok_or_else(|| {
            ApiError::InvalidResponse("Missing question_json in response.".to_string())
        })?;

        info!(test_id = attempt.test_id, attempt_id = attempt.attempt_id, "Test started");
        Ok(ExamLaunch {
            test_id: attempt.test_id,
            attempt_id: attempt.attempt_id,
            message: response.message,
            question_json,
        })
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(Some(response))
        } else if status.as_u16() == 429 {
            Ok(None)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, ApiError> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            debug!(url = url, "POST");
            let mut request = self.client.post(url).json(body);
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }
            let response = request.send().await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let text = response.text().await?;
                    return serde_json::from_str(&text).map_err(|e| {
                        ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
                    });
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited);
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
}
