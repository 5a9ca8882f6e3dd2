//! Rate limiting utilities for the GitHub API.
//!
//! Code search and the core REST API have separate budgets. Before each call
//! the relevant budget is checked, and when it is almost spent we sleep until
//! the window resets.

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// GitHub API budget a request is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResource {
    /// Code search (`/search/code`).
    Search,
    /// Everything else, e.g. repository metadata.
    Core,
}

/// Rate limit information for a specific resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

/// Fetches the current rate limit status for `resource`.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let rate = match resource {
        RateLimitResource::Search => &rate_limit.resources.search,
        RateLimitResource::Core => &rate_limit.resources.core,
    };

    Ok(RateLimitInfo {
        remaining: rate.remaining as u32,
        reset: rate.reset,
        limit: rate.limit as u32,
    })
}

/// Returns how long to sleep before the next request, if at all.
///
/// `now` is a Unix timestamp in seconds.
pub fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Ensures there is budget left for `resource`, sleeping until reset otherwise.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<(), octocrab::Error> {
    let info = check_rate_limit(octocrab, resource).await?;
    wait_if_needed(&info).await;
    Ok(())
}
