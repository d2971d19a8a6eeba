//! REST API client module for the Quantum Scholar test portal.
//!
//! This module provides the `ApiClient` for the three portal calls:
//! login, attempt initialisation and test start.
//!
//! The backend issues an opaque token at login; later calls carry it in
//! the JSON body together with the candidate's email.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{is_unauthorized, ApiError};
