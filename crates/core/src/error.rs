use std::path::PathBuf;
use thiserror::Error;

use crate::models::Instant;

/// Error types for Planboard core operations
///
/// Navigation, clamping and mapping are total and never fail; errors only
/// arise when constructing values from external input or reading records.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A window whose start lies after its end
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: Instant, end: Instant },

    /// Bounds whose minimum lies after their maximum
    #[error("Invalid bounds: min {min} is after max {max}")]
    InvalidBounds { min: Instant, max: Instant },

    /// Error reading the schedule record file
    #[error("Failed to read schedule records at {path}: {source}")]
    RecordSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding the schedule record file
    #[error("Failed to parse schedule records at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error for invalid input or validation failure
    #[error("{message}")]
    ValidationError { message: String },
}

impl CoreError {
    /// Get the full error message including nested decoder details.
    ///
    /// This is useful for displaying detailed error information to users.
    pub fn full_message(&self) -> String {
        match self {
            CoreError::Parse { path, source } => {
                format!(
                    "Failed to parse schedule records at {}: {}",
                    path.display(),
                    source
                )
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
