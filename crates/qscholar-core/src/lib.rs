//! Core library for the Quantum Scholar test portal client.
//!
//! Holds everything that does not depend on the terminal: configuration and
//! endpoint resolution, wire models, the HTTP API client and the token file
//! that backs a login session.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{Session, SessionData};
pub use config::{Config, Endpoints};
