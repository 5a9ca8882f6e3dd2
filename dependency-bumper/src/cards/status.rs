//! Review card status types.

use serde::Serialize;

/// Status of a card creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardStatus {
    /// Card filed.
    Created {
        /// Board-assigned card id, when the response carried one.
        id: Option<String>,
        /// Link to the card, when the board returns one.
        url: Option<String>,
    },

    /// Card creation failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl CardStatus {
    /// Returns true if the card was filed.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}
