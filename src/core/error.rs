//! Error types for the application

use thiserror::Error;

/// Failure of the tabular parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input has no header line")]
    Empty,
}

/// A parsed row that does not match the expected record schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid value '{value}' for field '{field}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// A filter action that would break a selection invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("daily hours must be between 1 and 24, got {0}")]
    DailyHours(u32),

    #[error("workload factor must be one of 0.15, 0.6, 1.0, got {0}")]
    Workload(f64),
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("Error loading data: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Fetch(e.to_string())
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
