//! Error taxonomy for the level-detection engine.
//!
//! The engine only ever fails at its entry boundary: parameters are checked first, then the
//! series. Once both pass, every stage is infallible (an empty result is a valid answer).

use chrono::NaiveDate;
use thiserror::Error;

/// Problems with the price series handed to the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("price series for '{contract}' is empty")]
    EmptySeries { contract: String },

    #[error("insufficient data for '{contract}': need at least {required} bars, got {actual}")]
    InsufficientData {
        contract: String,
        required: usize,
        actual: usize,
    },

    #[error("dates are not strictly increasing at index {index}: {previous} followed by {current}")]
    NonMonotonicDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },
}

/// A detection parameter outside its documented domain.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parameter '{name}': {reason}")]
pub struct ConfigurationError {
    pub name: &'static str,
    pub reason: String,
}

impl ConfigurationError {
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

pub type LevelResult<T> = std::result::Result<T, LevelError>;
