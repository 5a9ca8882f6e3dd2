//! Code search hits.

use serde::Serialize;

/// A file that references a package, as returned by code search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Numeric id of the owning repository.
    pub repository_id: u64,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Repository-relative path of the matching file.
    pub path: String,
}
