// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # issue-pager
//!
//! One pagination interface over Jira issue search, whether the deployment
//! pages with `startAt`/`total` offsets or with `nextPageToken` continuations.
//!
//! ## Features
//!
//! - **Mode detection per batch**: legacy offset or token paging, decided from the response
//! - **Logical start offset**: skip N matches in either mode
//! - **Single page or all pages**: stop after the first emitted batch, or run to completion
//! - **Transport**: retries, rate limiting, Basic/Bearer auth, response caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use issue_pager::config::JiraConfig;
//! use issue_pager::http::HttpClient;
//! use issue_pager::pagination::{FetchOptions, Paginator};
//! use issue_pager::search::JiraSearchClient;
//!
//! #[tokio::main]
//! async fn main() -> issue_pager::Result<()> {
//!     let config = JiraConfig::from_file("jira.yaml")?.apply_env();
//!     config.validate()?;
//!
//!     let http = HttpClient::with_auth(config.http_config(), config.auth_config())?;
//!     let search = JiraSearchClient::new(http, config.api_version);
//!     let paginator = Paginator::new(search, config.fields.clone());
//!
//!     let issues = paginator
//!         .fetch("project = ABC", &FetchOptions::new().start_at(Some(20)))
//!         .await?;
//!     println!("{} issues", issues.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Paginator                          │
//! │  fetch(jql, options) → Vec<issue>                         │
//! │  classify batch → Legacy { total } | Token { token, last }│
//! └─────────────────────────────┬─────────────────────────────┘
//!                               │ IssueSearch::search(PageRequest)
//! ┌──────────────┬──────────────┴──┬──────────────┬───────────┐
//! │   Cache      │   Jira client   │    HTTP      │   Auth    │
//! ├──────────────┼─────────────────┼──────────────┼───────────┤
//! │ TTL, keyed   │ /api/2/search   │ Retry        │ Basic     │
//! │ by request   │ /api/3/search/  │ Rate limit   │ Bearer    │
//! │              │   jql           │ Backoff      │           │
//! └──────────────┴─────────────────┴──────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Search collaborator: Jira client and response cache
pub mod search;

/// Batch classification and the paginator
pub mod pagination;

/// Configuration file and defaults
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{FetchOptions, Paginator};
pub use search::{IssueSearch, PageRequest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
