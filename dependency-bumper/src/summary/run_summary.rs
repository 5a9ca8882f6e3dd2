//! Run summary types.

use super::result::ProcessingResult;
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of packages processed.
    pub packages_processed: usize,

    /// Packages whose search returned nothing.
    pub packages_without_consumers: usize,

    /// Packages whose search failed.
    pub packages_failed: usize,

    /// Number of search hits across all packages.
    pub search_hits: usize,

    /// Number of projects eligible for editing.
    pub projects_resolved: usize,

    /// Number of repositories excluded (archived, read-only, lookup failed).
    pub repositories_excluded: usize,

    /// Number of projects bumped and pushed.
    pub projects_updated: usize,

    /// Number of projects left alone.
    pub projects_skipped: usize,

    /// Number of projects that failed.
    pub projects_failed: usize,

    /// Number of review cards filed.
    pub cards_created: usize,

    /// Number of review cards that could not be filed.
    pub cards_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Per-project results, in processing order.
    pub results: Vec<ProcessingResult>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: ProcessingResult) {
        match &result {
            ProcessingResult::Updated { .. } => self.projects_updated += 1,
            ProcessingResult::Skipped { .. } => self.projects_skipped += 1,
            ProcessingResult::Failed { .. } => self.projects_failed += 1,
        }

        match result.card() {
            Some(card) if card.is_created() => self.cards_created += 1,
            Some(_) => self.cards_failed += 1,
            None => {}
        }

        self.results.push(result);
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.packages_failed > 0 || self.projects_failed > 0 || self.cards_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
