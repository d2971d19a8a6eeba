//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{parse_timestamp, truncate_string};
