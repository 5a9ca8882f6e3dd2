//! Access to the code host.
//!
//! The pipeline only needs two things from GitHub: code search and the
//! access flags of a repository. [`CodeHost`] captures exactly that, so the
//! locator and resolver can run against an in-memory host in tests.

mod client;
mod error;

pub use error::HostError;

use crate::discovery::SearchHit;
use async_trait::async_trait;
use serde::Serialize;

/// What the acting credential may do with a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepositoryAccess {
    /// Repository is archived (read-only).
    pub archived: bool,

    /// Credential holds push permission.
    pub can_push: bool,
}

/// Code search and repository metadata lookups.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Runs a code search query and returns every hit.
    async fn search_code(&self, query: &str) -> Result<Vec<SearchHit>, HostError>;

    /// Fetches archive and permission flags for `owner/name`.
    async fn repository_access(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryAccess, HostError>;
}
