//! Error types for the TUI module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use planboard_core::CoreError;

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Failed to initialize or restore the terminal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Invalid configuration or unreadable schedule records.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
