//! Error types for the release builder.
//!
//! Step-level verdicts (success, warning, fatal-with-diagnostic) are carried
//! by [`crate::release::Outcome`]; this error type covers conditions that
//! unwind the pipeline through `?` regardless of outcome aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release builder operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release builder operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors
    #[error("configuration error in {}: {reason}", .path.display())]
    Config {
        /// Configuration file that failed to load
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Spawning an external command failed
    #[error("failed to run {command}: {source}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// An external command ran but exited with a failure status
    #[error("{command} exited with status {code:?}")]
    CommandStatus {
        /// Command that failed
        command: String,
        /// Exit code, if any
        code: Option<i32>,
    },

    /// Installer script template errors (unknown placeholder, bad syntax)
    #[error("installer template error: {0}")]
    Template(String),

    /// Invalid glob pattern in static configuration
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Run aborted by the operator (prompt abort, closed stdin, interrupt)
    #[error("aborted by the user")]
    Cancelled,
}
