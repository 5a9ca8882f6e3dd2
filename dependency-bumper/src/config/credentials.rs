//! Credentials for the code host and the review board.

use std::fmt;

/// Secrets needed by a run.
///
/// Read once at startup and passed to each component explicitly.
#[derive(Clone)]
pub struct Credentials {
    /// Token for the code host API, also used to authenticate clones.
    pub github_token: String,

    /// Board API key.
    pub board_key: String,

    /// Board API token.
    pub board_token: String,

    /// Board list that review cards are filed into.
    pub board_list_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &"<redacted>")
            .field("board_key", &"<redacted>")
            .field("board_token", &"<redacted>")
            .field("board_list_id", &self.board_list_id)
            .finish()
    }
}
