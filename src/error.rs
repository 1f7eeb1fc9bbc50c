//! Error types for table lookups, schedule loading and request parsing
//!
//! The curve engine itself is total over well-formed schedules and never
//! returns these; they are raised before a profile reaches the engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxError>;

#[derive(Error, Debug)]
pub enum TaxError {
    #[error("No tax tables for year {0}")]
    UnsupportedYear(u16),

    #[error("No bracket table for state {0}")]
    UnsupportedState(String),

    #[error("Unknown filing status: {0}")]
    UnknownFilingStatus(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Schedule file {0} has no brackets")]
    EmptySchedule(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
