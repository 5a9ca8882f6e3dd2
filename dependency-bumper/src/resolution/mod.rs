//! Repository resolution.
//!
//! Turns raw search hits into the set of projects we are allowed to edit:
//! one entry per repository, archived and read-only repositories removed.

mod project;

pub use project::{ExcludedRepository, ExclusionReason, ResolvedProject, Resolution};

use crate::discovery::SearchHit;
use crate::github::CodeHost;
use std::collections::HashSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Resolves search hits into editable projects.
///
/// The first hit for a repository wins. Metadata is fetched at most once per
/// repository id, whether or not the repository ends up excluded. Lookup
/// failures exclude the repository instead of failing the whole resolution.
///
/// When `limit` is set, resolution stops once that many projects are found.
pub async fn resolve_projects(
    host: &dyn CodeHost,
    hits: &[SearchHit],
    limit: Option<usize>,
) -> Resolution {
    let span = info_span!("resolve", hits = hits.len());

    async {
        let mut resolution = Resolution::default();
        let mut seen = HashSet::new();

        for hit in hits {
            if limit.is_some_and(|max| resolution.projects.len() >= max) {
                info!(limit = ?limit, "Project limit reached, ignoring remaining hits");
                break;
            }

            // The same repository can show up once per matching file
            if !seen.insert(hit.repository_id) {
                debug!(repo = %hit.full_name, path = %hit.path, "Repository already seen");
                continue;
            }

            let reason = match host.repository_access(&hit.owner, &hit.name).await {
                Ok(access) if access.archived => Some(ExclusionReason::Archived),
                Ok(access) if !access.can_push => Some(ExclusionReason::NoPushAccess),
                Ok(_) => None,
                Err(e) => {
                    warn!(repo = %hit.full_name, error = %e, "Failed to fetch repository metadata");
                    Some(ExclusionReason::LookupFailed {
                        error: e.to_string(),
                    })
                }
            };

            if let Some(reason) = reason {
                info!(repo = %hit.name, reason = %reason, "Skipping project");
                resolution.excluded.push(ExcludedRepository {
                    full_name: hit.full_name.clone(),
                    reason,
                });
                continue;
            }

            debug!(repo = %hit.full_name, project = %hit.path, "Resolved project");
            resolution.projects.insert(
                hit.repository_id,
                ResolvedProject {
                    repository_id: hit.repository_id,
                    owner: hit.owner.clone(),
                    name: hit.name.clone(),
                    full_name: hit.full_name.clone(),
                    project_path: hit.path.clone(),
                },
            );
        }

        info!(
            resolved = resolution.projects.len(),
            excluded = resolution.excluded.len(),
            "Resolution complete"
        );
        resolution
    }
    .instrument(span)
    .await
}
