use chrono::NaiveDate;
use thiserror::Error;

/// Layout the candidate types the birthdate in
pub const BIRTHDATE_INPUT_FORMAT: &str = "%d-%m-%Y";

/// Layout the backend expects on the wire
pub const BIRTHDATE_WIRE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BirthdateError {
    #[error("Birthdate is required")]
    Empty,

    #[error("Birthdate must be a valid date in DD-MM-YYYY format")]
    Invalid,
}

/// Candidate birthdate, the second login factor next to the email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthdate(NaiveDate);

impl Birthdate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse the `DD-MM-YYYY` form typed into the login screen
    pub fn parse_input(input: &str) -> Result<Self, BirthdateError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(BirthdateError::Empty);
        }
        NaiveDate::parse_from_str(input, BIRTHDATE_INPUT_FORMAT)
            .map(Self)
            .map_err(|_| BirthdateError::Invalid)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, as sent to the login endpoint
    pub fn to_wire(&self) -> String {
        self.0.format(BIRTHDATE_WIRE_FORMAT).to_string()
    }
}
