//! Code host error types.

use thiserror::Error;

/// Errors returned by a [`CodeHost`](super::CodeHost).
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The host answered, but not with what we needed.
    #[error("Unexpected response for {subject}: {message}")]
    UnexpectedResponse { subject: String, message: String },
}
