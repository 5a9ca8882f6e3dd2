//! Consumer discovery using GitHub Code Search.
//!
//! Finds project files that reference a package inside one organization.

mod error;
mod hit;

pub use error::DiscoveryError;
pub use hit::SearchHit;

use crate::config::SearchScope;
use crate::github::CodeHost;
use tracing::{debug, info, info_span, Instrument};

/// Builds the code search query for a package.
///
/// Format: `{package} in:file extension:{ext} org:{org} -filename:{excluded}`.
/// The exclusion term is left out when no file name is excluded.
#[must_use]
pub fn build_search_query(package: &str, scope: &SearchScope) -> String {
    let mut query = format!(
        "{} in:file extension:{} org:{}",
        package, scope.extension, scope.organization
    );

    if let Some(excluded) = scope
        .exclude_filename
        .as_deref()
        .filter(|name| !name.trim().is_empty())
    {
        query.push_str(" -filename:");
        query.push_str(excluded);
    }

    query
}

/// Searches for project files referencing `package`.
///
/// An empty result is not an error; the caller decides what to do with it.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the search itself fails.
pub async fn search_consumers(
    host: &dyn CodeHost,
    package: &str,
    scope: &SearchScope,
) -> Result<Vec<SearchHit>, DiscoveryError> {
    let span = info_span!(
        "discover",
        package = %package,
        organization = %scope.organization,
        extension = %scope.extension
    );

    async {
        info!("Searching for package consumers");

        let query = build_search_query(package, scope);
        debug!(query = %query, "Executing code search");

        let hits = host
            .search_code(&query)
            .await
            .map_err(|source| DiscoveryError::SearchFailed {
                package: package.to_string(),
                source,
            })?;

        info!(count = hits.len(), "Search complete");
        Ok(hits)
    }
    .instrument(span)
    .await
}
