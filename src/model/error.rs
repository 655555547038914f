//! Error types for pagesel.
//!
//! Errors are `thiserror` enums composed with `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from `main`
//!   - [`FetchError`] - record provider failures
//!   - [`ConfigError`](crate::config::ConfigError) - config file loading failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failures
//!   - `std::io::Error` - terminal failures
//! - [`SelectionError`] - rejected user input to the selection model
//!
//! # Recovery
//!
//! Fetch and selection errors are never fatal. A failed fetch leaves the
//! previously loaded page in place and is shown in the status line. An
//! invalid "select first N" count is reported and causes no mutation.

use crate::model::identifiers::PageIndex;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// The record source could not be opened or read.
    #[error("Failed to load records: {0}")]
    Fetch(#[from] FetchError),

    /// A config file exists but is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure reported by a record provider for one page request.
///
/// Carries owned strings rather than source errors so that results can be
/// cloned across the loader channel and kept in the page store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The backing file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// I/O failure while reading records.
    #[error("I/O error reading {path}: {reason}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error message.
        reason: String,
    },

    /// A record could not be decoded.
    #[error("Invalid record at line {line}: {reason}")]
    Parse {
        /// 1-based line number in the source.
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// The requested page lies past the last page of the record set.
    #[error("{index} is out of range ({total_pages} pages available)")]
    PageOutOfRange {
        /// The page that was requested.
        index: PageIndex,
        /// Number of pages that exist.
        total_pages: usize,
    },

    /// The provider was dropped before it answered.
    #[error("Record provider disconnected")]
    Disconnected,
}

/// Rejected request to the selection model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// "Select first N" received a count that is not a positive integer.
    #[error("Enter a valid number")]
    InvalidSelectionCount(#[from] InvalidSelectionCount),
}

/// Why a "select first N" count was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidSelectionCount {
    /// Input was empty or not an integer.
    #[error("not a number: {input:?}")]
    NotANumber {
        /// The text that was entered.
        input: String,
    },

    /// Input was zero or negative.
    #[error("count must be positive, got {value}")]
    NonPositive {
        /// The parsed value.
        value: i64,
    },
}
