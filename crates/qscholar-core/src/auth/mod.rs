//! Authentication module for managing the portal session.
//!
//! This module provides `Session`: the access token persisted to a dotfile
//! in the user's home directory. The token is written on login and removed
//! on logout or when the backend rejects it.

pub mod session;

pub use session::{Session, SessionData};
