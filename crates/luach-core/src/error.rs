//! Core error types for luach-core.
//!
//! The engine itself is a pure calculator: every failure here is local and
//! recoverable by the caller. Derivation failures carry the event they broke
//! on; reference-data failures abort the load instead of letting a bad
//! clock value through.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for luach-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule derivation errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Reference-data errors
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Calendar API errors
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Derivation errors from the schedule rule engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A rule produced a minute value outside `[0, 1439]`.
    ///
    /// Wrapping modulo 1440 would be silently wrong, so the bad value is
    /// reported with the event that produced it.
    #[error("derived time for '{event}' is out of range: {minutes} minutes")]
    InvalidDerivedTime { event: &'static str, minutes: i32 },
}

/// Reference-data integrity errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A clock value that is not a valid minute of the day.
    #[error("invalid clock time '{value}': expected HH:MM within 00:00..23:59")]
    InvalidClockTime { value: String },

    /// A minute-of-day count outside `[0, 1439]`.
    #[error("minute count {minutes} is outside the day")]
    MinutesOutOfDay { minutes: u32 },

    /// Failed to parse a reference table.
    #[error("failed to parse yearly table: {0}")]
    TableParseFailed(String),

    /// Yearly table rows must be strictly ascending by date.
    #[error("yearly table is not ordered: {date} does not follow {previous}")]
    UnorderedTable {
        previous: chrono::NaiveDate,
        date: chrono::NaiveDate,
    },
}

/// Errors from the Hebcal calendar client.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// HTTP transport or status failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An item is missing a field the client needs
    #[error("calendar item is missing '{0}'")]
    MissingField(&'static str),

    /// An item timestamp could not be parsed
    #[error("bad calendar timestamp '{0}'")]
    BadTimestamp(String),

    /// The response contained no candle-lighting entry for the range
    #[error("no Shabbat found between {start} and {end}")]
    NoShabbatFound {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
