//! [`CodeHost`] implementation backed by octocrab.

use super::{CodeHost, HostError, RepositoryAccess};
use crate::discovery::SearchHit;
use crate::rate_limit::{ensure_rate_limit, RateLimitResource};
use async_trait::async_trait;
use octocrab::models::Code;
use octocrab::{Octocrab, Page};
use std::future::Future;
use tracing::{debug, warn};

/// Maximum results from GitHub Code Search API.
const MAX_SEARCH_RESULTS: usize = 1000;

/// Results per page for code search.
const RESULTS_PER_PAGE: u8 = 100;

#[async_trait]
impl CodeHost for Octocrab {
    async fn search_code(&self, query: &str) -> Result<Vec<SearchHit>, HostError> {
        let hits = collect_pages(
            move || reserve_search(self),
            move |cursor| async move {
                let page = match cursor {
                    None => Some(
                        self.search()
                            .code(query)
                            .per_page(RESULTS_PER_PAGE)
                            .send()
                            .await?,
                    ),
                    Some(next) => self.get_page::<Code>(&Some(next)).await?,
                };
                let next = page.as_ref().and_then(|page| page.next.clone());
                let hits = page.as_ref().map(extract_hits).unwrap_or_default();
                Ok::<_, HostError>((hits, next))
            },
        )
        .await?;

        debug!(count = hits.len(), "Code search returned hits");
        Ok(hits)
    }

    async fn repository_access(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryAccess, HostError> {
        ensure_rate_limit(self, RateLimitResource::Core).await?;

        let repository = self.repos(owner, name).get().await?;
        let permissions =
            repository
                .permissions
                .ok_or_else(|| HostError::UnexpectedResponse {
                    subject: format!("{owner}/{name}"),
                    message: "repository permissions missing".to_string(),
                })?;

        Ok(RepositoryAccess {
            archived: repository.archived.unwrap_or(false),
            can_push: permissions.push,
        })
    }
}

async fn reserve_search(octocrab: &Octocrab) -> Result<(), HostError> {
    Ok(ensure_rate_limit(octocrab, RateLimitResource::Search).await?)
}

/// Walks a paginated search, reserving budget before every request.
///
/// `fetch` receives `None` for the first page and the previous page's cursor
/// afterwards. Stops when a page has no cursor or the result cap is reached.
async fn collect_pages<C, R, RFut, F, FFut>(
    mut reserve: R,
    mut fetch: F,
) -> Result<Vec<SearchHit>, HostError>
where
    R: FnMut() -> RFut,
    RFut: Future<Output = Result<(), HostError>>,
    F: FnMut(Option<C>) -> FFut,
    FFut: Future<Output = Result<(Vec<SearchHit>, Option<C>), HostError>>,
{
    let mut hits = Vec::new();
    let mut cursor = None;

    loop {
        reserve().await?;
        let (page_hits, next) = fetch(cursor.take()).await?;
        hits.extend(page_hits);

        let Some(next) = next else {
            break;
        };

        if hits.len() >= MAX_SEARCH_RESULTS {
            warn!(
                max = MAX_SEARCH_RESULTS,
                "Reached maximum search results limit"
            );
            break;
        }

        cursor = Some(next);
    }

    Ok(hits)
}

/// Converts a page of code search results into hits.
///
/// Items whose repository has no owner are dropped.
fn extract_hits(page: &Page<Code>) -> Vec<SearchHit> {
    page.items
        .iter()
        .filter_map(|item| {
            let repository = &item.repository;
            let owner = repository.owner.as_ref()?.login.clone();
            let name = repository.name.clone();
            let full_name = repository
                .full_name
                .clone()
                .unwrap_or_else(|| format!("{owner}/{name}"));

            Some(SearchHit {
                repository_id: repository.id.0,
                owner,
                name,
                full_name,
                path: item.path.clone(),
            })
        })
        .collect()
}
