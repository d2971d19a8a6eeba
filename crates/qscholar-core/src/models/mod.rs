//! Data models for the test portal.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `Test`, `Availability`: entries of the catalog returned at login
//! - `Birthdate`: the candidate's second login factor
//! - Request/response bodies for login, attempt initialisation and start
//! - `Attempt`, `ExamLaunch`: validated results handed to the UI

pub mod candidate;
pub mod portal;
pub mod test;

pub use candidate::{Birthdate, BirthdateError};
pub use portal::{
    Attempt, ExamLaunch, InitTestRequest, InitTestResponse, LoginRequest, LoginResponse,
    LoginResult, StartTestRequest, StartTestResponse,
};
pub use test::{Availability, Test};
