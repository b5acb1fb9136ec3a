//! Search request type and the collaborator trait

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Parameters for one batch fetch
///
/// `start_at` only means something to offset-paginated deployments and
/// `page_token` only to token-paginated ones; both are always sent down so the
/// collaborator can pick whichever its backend understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// JQL expression
    pub jql: String,
    /// Advisory sort key
    pub order_by: Option<String>,
    /// Legacy offset
    pub start_at: u64,
    /// Page size
    pub max_results: u32,
    /// Field projection
    pub fields: Vec<String>,
    /// Continuation token
    pub page_token: Option<String>,
    /// Whether cached responses may be served (not part of the cache key)
    #[serde(skip_serializing)]
    pub use_cache: bool,
}

impl PageRequest {
    /// Create a request for the first page of a query
    pub fn new(jql: impl Into<String>, max_results: u32) -> Self {
        Self {
            jql: jql.into(),
            order_by: None,
            start_at: 0,
            max_results,
            fields: Vec::new(),
            page_token: None,
            use_cache: true,
        }
    }
}

/// One batch fetch against the issue search backend
///
/// Implementations return the raw response mapping; the paginator decides
/// which pagination style it uses from the keys present. Authentication,
/// transport, timeouts and caching are the implementor's business.
#[async_trait]
pub trait IssueSearch: Send + Sync {
    /// Execute one search call
    async fn search(&self, request: &PageRequest) -> Result<Value>;

    /// Key under which the response to `request` may be cached
    ///
    /// Requests that reach the backend identically should share a key.
    /// Defaults to the whole serialized request.
    fn cache_key(&self, request: &PageRequest) -> Result<String> {
        crate::search::SearchCache::key(request)
    }
}

#[async_trait]
impl<T: IssueSearch + ?Sized> IssueSearch for Arc<T> {
    async fn search(&self, request: &PageRequest) -> Result<Value> {
        (**self).search(request).await
    }

    fn cache_key(&self, request: &PageRequest) -> Result<String> {
        (**self).cache_key(request)
    }
}
