//! Error handling utilities for the calnote application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Note that most per-file failures (an unreadable note, a push that failed)
//! never surface as an `AppError` to the user: the operations log them and
//! count them in their reports so the rest of the run can continue.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or decoding the event model.
///
/// # Examples
///
/// ```
/// use calnote::errors::EventError;
///
/// let error = EventError::DayOfMonthOutOfRange(31);
/// assert!(format!("{}", error).contains("31"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A time of day could not be parsed or lies outside the day.
    #[error("Invalid time of day: '{0}'. Expected HH:MM between 00:00 and 23:59")]
    InvalidTime(String),

    /// A timed event whose end is not after its start.
    #[error("Event end {end} must be after start {start}")]
    EndNotAfterStart {
        /// Formatted start time
        start: String,
        /// Formatted end time
        end: String,
    },

    /// A weekly recurrence without any weekday.
    #[error("Weekly recurrence needs at least one weekday")]
    EmptyWeekdays,

    /// The same weekday selected twice.
    #[error("Weekday '{0}' is listed more than once")]
    DuplicateWeekday(char),

    /// A weekday code outside `U M T W R F S`.
    #[error("Unknown weekday code '{0}'. Expected one of U, M, T, W, R, F, S")]
    UnknownWeekday(String),

    /// Day of month outside the supported range.
    #[error("Day of month {0} is out of range (1-28)")]
    DayOfMonthOutOfRange(u32),

    /// Month outside 1-12.
    #[error("Month {0} is out of range (1-12)")]
    MonthOutOfRange(u32),

    /// A frontmatter key the event needs is absent.
    #[error("Missing frontmatter field '{0}'")]
    MissingField(&'static str),

    /// A frontmatter value that cannot be interpreted.
    #[error("Invalid value '{value}' for frontmatter field '{field}'")]
    InvalidField {
        /// The frontmatter key
        field: &'static str,
        /// The raw value found
        value: String,
    },

    /// A recurring event that sets more than one schedule dimension.
    #[error("Recurring event sets more than one schedule: {0}")]
    ConflictingRecurrence(String),

    /// A file name that does not follow any Full Note naming scheme.
    #[error("File name '{0}' is not a Full Note event name")]
    UnrecognizedFilename(String),
}

/// Represents specific error cases that can occur when pushing files to a device.
///
/// Each variant captures the push command and, where available, the underlying
/// I/O error, mirroring how the command was spawned.
///
/// # Examples
///
/// ```
/// use calnote::errors::SyncError;
///
/// let error = SyncError::NonZeroExit {
///     command: "adb".to_string(),
///     status_code: 1,
/// };
///
/// assert!(format!("{}", error).contains("non-zero status code"));
/// assert!(format!("{}", error).contains("adb"));
/// ```
#[derive(Debug, Error)]
pub enum SyncError {
    /// The push command could not be found.
    #[error("Push command '{command}' not found: {source}. Please check that adb is installed or set CALNOTE_ADB.")]
    CommandNotFound {
        /// The command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Permission was denied when executing the push command.
    #[error("Permission denied when trying to execute '{command}': {source}")]
    PermissionDenied {
        /// The command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The push command failed to start for another reason.
    #[error("Failed to execute '{command}': {source}")]
    ExecutionFailed {
        /// The command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The push command exited unsuccessfully.
    #[error("Push command '{command}' exited with non-zero status code: {status_code}. Is the device connected and authorized?")]
    NonZeroExit {
        /// The command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },

    /// A changed file that does not live under the watched directory.
    #[error("File {path} is outside the watched directory")]
    OutsideRoot {
        /// The offending path
        path: PathBuf,
    },
}

/// Represents all possible errors that can occur in the calnote application.
///
/// # Examples
///
/// ```
/// use calnote::errors::AppError;
///
/// let error = AppError::Config("Remote directory is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Remote directory is empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors in the event model or filename codec.
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Errors when pushing files to a device.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_from_event_error() {
        let app_error: AppError = EventError::EmptyWeekdays.into();
        assert_eq!(
            format!("{}", app_error),
            "Event error: Weekly recurrence needs at least one weekday"
        );
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        assert_eq!(
            format!("{}", AppError::Io(io_error)),
            "I/O error: permission denied"
        );
    }

    #[test]
    fn test_sync_error_keeps_source() {
        use std::error::Error as _;

        let error = SyncError::CommandNotFound {
            command: "adb".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(error.source().is_some());
        assert!(format!("{}", error).contains("CALNOTE_ADB"));
    }
}
