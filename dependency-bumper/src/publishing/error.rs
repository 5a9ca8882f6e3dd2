//! Change publishing error types.

use thiserror::Error;

/// Errors that can occur while cloning, committing or pushing.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Could not build the authenticated clone URL.
    #[error("Invalid clone URL for '{full_name}': {message}")]
    InvalidCloneUrl { full_name: String, message: String },

    /// Could not prepare the local clone directory.
    #[error("Failed to prepare clone directory '{path}': {source}")]
    WorkspaceFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Clone failed.
    #[error("Failed to clone repository: {message}")]
    CloneFailed { message: String },

    /// A git command failed.
    #[error("git {command} failed: {message}")]
    GitFailed { command: String, message: String },

    /// Push failed.
    #[error("Failed to push changes: {message}")]
    PushFailed { message: String },
}
