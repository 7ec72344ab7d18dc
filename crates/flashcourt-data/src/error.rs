//! Dataset loading error types.

use thiserror::Error;

/// Errors that can occur while fetching or parsing the player table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The request did not complete in time.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// A local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The document is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks columns the quiz needs.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
