//! In-memory code host for unit tests.

use crate::discovery::SearchHit;
use crate::github::{CodeHost, HostError, RepositoryAccess};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Code host that answers from fixed tables and records every call.
#[derive(Default)]
pub(crate) struct FakeHost {
    hits: HashMap<String, Vec<SearchHit>>,
    access: HashMap<String, Result<RepositoryAccess, String>>,
    failing_search: bool,
    queries: Mutex<Vec<String>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `hits` for any query starting with `package`.
    pub(crate) fn with_hits(mut self, package: &str, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(package.to_string(), hits);
        self
    }

    pub(crate) fn with_access(mut self, full_name: &str, archived: bool, can_push: bool) -> Self {
        self.access.insert(
            full_name.to_string(),
            Ok(RepositoryAccess { archived, can_push }),
        );
        self
    }

    pub(crate) fn with_lookup_error(mut self, full_name: &str, message: &str) -> Self {
        self.access
            .insert(full_name.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn failing_search(mut self) -> Self {
        self.failing_search = true;
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeHost for FakeHost {
    async fn search_code(&self, query: &str) -> Result<Vec<SearchHit>, HostError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.failing_search {
            return Err(HostError::UnexpectedResponse {
                subject: "search".to_string(),
                message: "search unavailable".to_string(),
            });
        }

        let package = query.split_whitespace().next().unwrap_or_default();
        Ok(self.hits.get(package).cloned().unwrap_or_default())
    }

    async fn repository_access(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryAccess, HostError> {
        let full_name = format!("{owner}/{name}");
        self.lookups.lock().unwrap().push(full_name.clone());

        match self.access.get(&full_name) {
            Some(Ok(access)) => Ok(*access),
            Some(Err(message)) => Err(HostError::UnexpectedResponse {
                subject: full_name,
                message: message.clone(),
            }),
            None => Err(HostError::UnexpectedResponse {
                subject: full_name,
                message: "not found".to_string(),
            }),
        }
    }
}

/// Builds a search hit in the `trustpilot` organization.
pub(crate) fn hit(repository_id: u64, name: &str, path: &str) -> SearchHit {
    SearchHit {
        repository_id,
        owner: "trustpilot".to_string(),
        name: name.to_string(),
        full_name: format!("trustpilot/{name}"),
        path: path.to_string(),
    }
}
