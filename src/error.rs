use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid reference date: {0}")]
    InvalidReferenceDate(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, CardError>;

/// Fields that can be mandatory depending on how the card is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Number,
    Month,
    Year,
    Name,
    VerificationValue,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Number => "number",
            Field::Month => "month",
            Field::Year => "year",
            Field::Name => "name",
            Field::VerificationValue => "verification_value",
        };
        f.write_str(name)
    }
}

/// A data-rejection outcome. These are reported back to the caller, never raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expiry month is not between 1 and 12")]
    ExpiryInvalid,
    #[error("card has expired")]
    CardExpired,
    #[error("{0} is required")]
    MissingRequiredField(Field),
}

/// All validation failures found on a card, in the order they were checked.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
