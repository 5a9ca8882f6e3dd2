//! Change publishing status types.

use serde::Serialize;

/// Status of a commit-and-push attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishStatus {
    /// Branch pushed to the remote.
    Pushed {
        /// Branch name on the remote.
        branch: String,
    },

    /// Nothing to commit.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Commit or push failed. The local clone is left as is.
    Failed {
        /// Error message.
        error: String,
    },
}
