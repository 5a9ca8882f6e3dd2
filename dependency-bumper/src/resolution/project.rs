//! Resolved project types.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A repository eligible for automated editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProject {
    /// Numeric repository id.
    pub repository_id: u64,

    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Repository-relative path of the project file to edit.
    pub project_path: String,
}

/// Why a repository was left out of the resolved set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Repository is archived.
    Archived,

    /// Credential lacks push permission.
    NoPushAccess,

    /// Metadata could not be fetched.
    LookupFailed {
        /// Error message.
        error: String,
    },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archived => f.write_str("Project archived"),
            Self::NoPushAccess => f.write_str("No write access"),
            Self::LookupFailed { error } => write!(f, "Metadata lookup failed: {error}"),
        }
    }
}

/// A repository that matched the search but will not be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRepository {
    /// Full repository name.
    pub full_name: String,

    /// Why it was excluded.
    pub reason: ExclusionReason,
}

/// Result of resolving a set of search hits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolution {
    /// Eligible projects keyed by repository id, at most one per repository.
    pub projects: BTreeMap<u64, ResolvedProject>,

    /// Repositories that were looked up and rejected.
    pub excluded: Vec<ExcludedRepository>,
}
