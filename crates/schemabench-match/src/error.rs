//! Error types for matcher construction and execution.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while building or running a matcher.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// No matcher registered under this name.
    #[error("unknown matcher '{name}' (known: {known})")]
    UnknownMatcher { name: String, known: String },

    /// Matcher arguments do not match its parameters.
    #[error("invalid arguments for matcher '{matcher}': {source}")]
    InvalidArgs {
        matcher: String,
        #[source]
        source: serde_json::Error,
    },

    /// The external process could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external process did not finish within its time budget.
    #[error("matcher process did not finish within {timeout:?}")]
    Timeout { timeout: Duration },

    /// The external process exited unsuccessfully or reported diagnostics.
    #[error("matcher process failed ({status}): {stderr}")]
    ProcessFailed { status: ExitStatus, stderr: String },

    /// The process finished but left no output file behind.
    #[error("matcher output not found: {path}")]
    OutputMissing { path: PathBuf },

    /// A line of matcher output does not follow the expected layout.
    #[error("malformed matcher output line {line_number} '{line}': {reason}")]
    Format {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// I/O error around the scratch output file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for matcher operations.
pub type Result<T> = std::result::Result<T, MatchError>;
