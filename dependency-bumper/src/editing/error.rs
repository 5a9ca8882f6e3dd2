//! Project file editing error types.

use thiserror::Error;

/// Errors that can occur while editing a project file.
#[derive(Debug, Error)]
pub enum EditError {
    /// Failed to read the project file.
    #[error("Failed to read project file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the project file back.
    #[error("Failed to write project file '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The substitution pattern could not be built.
    #[error("Invalid substitution pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
