//! Core error types for studyplan-core.
//!
//! Every fallible operation in the engine returns one of these typed errors.
//! The engine is pure computation, so nothing here is transient or retryable.

use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Distribution or reschedule errors
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    /// Review state errors
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while placing study items on the calendar.
///
/// Apart from [`PlanError::CalendarExhausted`], which only occurs at the last
/// representable date, these mean the inputs can never produce a complete
/// schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Every weekday has a zero minute budget
    #[error("capacity profile has no active weekday")]
    NoActiveWeekday,

    /// Items that do not fit into any single day of the profile
    #[error(
        "{} item(s) exceed the largest daily budget of {max_daily_minutes} min: {}",
        .items.len(),
        .items.join(", ")
    )]
    ItemsExceedCapacity {
        max_daily_minutes: u32,
        items: Vec<String>,
    },

    /// The calendar ceiling, or the last representable date, was reached
    /// with items still queued
    #[error(
        "{} item(s) still unplaced after {days_walked} calendar days: {}",
        .unplaced.len(),
        .unplaced.join(", ")
    )]
    CeilingReached {
        days_walked: u32,
        unplaced: Vec<String>,
    },

    /// No representable date exists after the reference date
    #[error("no calendar date exists after {from}")]
    CalendarExhausted { from: chrono::NaiveDate },
}

/// Review-state validation errors.
///
/// Inputs are rejected as given; only the computed easiness is clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    /// Grade outside {0, 1, 2}
    #[error("invalid grade {0}: expected 0 (hard), 1 (medium) or 2 (easy)")]
    InvalidGrade(u8),

    /// Interval must be at least one day
    #[error("invalid interval {0}: must be at least 1 day")]
    InvalidInterval(i64),

    /// Repetition count must be non-negative
    #[error("invalid repetition count {0}: must not be negative")]
    InvalidRepetitions(i64),

    /// Next due date falls outside the representable calendar
    #[error("interval of {0} days runs past the end of the calendar")]
    IntervalOverflow(i64),

    /// Easiness below the floor, or not a finite number
    #[error("invalid easiness {value}: must be a finite number >= {floor}")]
    InvalidEasiness { value: f64, floor: f64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SerializeFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
