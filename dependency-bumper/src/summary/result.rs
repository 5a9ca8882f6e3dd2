//! Processing result types.

use crate::cards::CardStatus;
use serde::Serialize;

/// Result of processing a single resolved project.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// The version was bumped and the branch pushed.
    Updated {
        /// Repository full name.
        repository: String,
        /// Package that was bumped.
        package: String,
        /// Branch pushed to the remote.
        branch: String,
        /// Review card status.
        card: CardStatus,
    },

    /// The project was left alone.
    Skipped {
        /// Repository full name.
        repository: String,
        /// Package that was considered.
        package: String,
        /// Reason for skipping.
        reason: String,
        /// Review card status.
        card: CardStatus,
    },

    /// Processing failed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Package that was considered.
        package: String,
        /// Error message.
        error: String,
    },
}

impl ProcessingResult {
    /// Returns the review card status, if a card was attempted.
    #[must_use]
    pub fn card(&self) -> Option<&CardStatus> {
        match self {
            Self::Updated { card, .. } | Self::Skipped { card, .. } => Some(card),
            Self::Failed { .. } => None,
        }
    }
}
