//! Search module
//!
//! The collaborator side of pagination: one call, one batch.
//!
//! # Overview
//!
//! - [`IssueSearch`] - the seam the paginator drives, one `search` per batch
//! - [`JiraSearchClient`] - talks to `/rest/api/2/search` or `/rest/api/3/search/jql`
//! - [`CachedSearch`] - wraps any `IssueSearch` with an in-memory response cache

mod cache;
mod client;
mod types;

pub use cache::{CachedSearch, SearchCache};
pub use client::{build_jql, JiraSearchClient};
pub use types::{IssueSearch, PageRequest};
