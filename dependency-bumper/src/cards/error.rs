//! Review card error types.

use thiserror::Error;

/// Errors that can occur while filing a review card.
#[derive(Debug, Error)]
pub enum CardError {
    /// Transport or decoding error.
    #[error("Board API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The board answered with a non-success status.
    #[error("Board API returned {status}: {body}")]
    Rejected { status: u16, body: String },
}
