//! Content renderers for each step of the portal flow.

pub mod exam;
pub mod instructions;
pub mod login;
pub mod test_list;
