//! Consumer discovery error types.

use crate::github::HostError;
use thiserror::Error;

/// Errors that can occur while locating package consumers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The code host rejected or failed the search.
    #[error("Code search for '{package}' failed: {source}")]
    SearchFailed {
        package: String,
        #[source]
        source: HostError,
    },
}
