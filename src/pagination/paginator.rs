//! The paginator: one uniform fetch over both Jira pagination styles

use super::types::{Batch, FetchOptions, FetchStats, PaginationCursor, RunPhase};
use crate::error::{Error, Result};
use crate::search::{IssueSearch, PageRequest};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Fetches every (or the first) page of a query through a search collaborator
///
/// Runs are strictly sequential: each request depends on the offset or token
/// produced by the previous response. A `Paginator` holds no per-run state, so
/// concurrent runs on a shared instance are independent as long as the
/// collaborator is.
#[derive(Debug)]
pub struct Paginator<S> {
    search: S,
    default_fields: Vec<String>,
}

impl<S: IssueSearch> Paginator<S> {
    /// Create a paginator over `search`, using `default_fields` when a run
    /// does not name its own projection
    pub fn new<I, F>(search: S, default_fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            search,
            default_fields: default_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The collaborator
    pub fn search(&self) -> &S {
        &self.search
    }

    /// The default projection
    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    /// Explicit fields, or a fresh copy of the defaults
    pub fn resolve_fields(&self, fields: Option<Vec<String>>) -> Vec<String> {
        fields.unwrap_or_else(|| self.default_fields.clone())
    }

    /// Fetch matching records, skipping the first `start_at`
    ///
    /// Any collaborator error aborts the run; records gathered before it are
    /// dropped.
    pub async fn fetch(&self, jql: &str, options: &FetchOptions) -> Result<Vec<Value>> {
        let (issues, _) = self.fetch_with_stats(jql, options).await?;
        Ok(issues)
    }

    /// Same as [`Paginator::fetch`], also reporting run counters
    pub async fn fetch_with_stats(
        &self,
        jql: &str,
        options: &FetchOptions,
    ) -> Result<(Vec<Value>, FetchStats)> {
        if options.page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be a positive integer",
            ));
        }

        let fields = self.resolve_fields(options.fields.clone());
        let mut cursor = PaginationCursor::new(options.start_at);
        let mut accumulated = Vec::new();
        let mut stats = FetchStats::default();

        debug!(
            jql,
            order_by = ?options.order_by,
            page_size = options.page_size,
            fetch_all = options.fetch_all,
            start_at = ?options.start_at,
            use_cache = options.use_cache,
            fields = ?fields,
            "Listing issues"
        );

        loop {
            let request = PageRequest {
                jql: jql.to_string(),
                order_by: options.order_by.clone(),
                start_at: cursor.offset,
                max_results: options.page_size,
                fields: fields.clone(),
                page_token: cursor.token.clone(),
                use_cache: options.use_cache,
            };

            let body = self.search.search(&request).await?;
            stats.pages += 1;

            let Batch {
                mut issues,
                mode,
                well_formed,
            } = Batch::from_response(body);

            if !well_formed {
                warn!(
                    page = stats.pages,
                    "Batch has no pagination metadata, treating it as the last page"
                );
            }

            debug!(
                page = stats.pages,
                offset = cursor.offset,
                records = issues.len(),
                mode = ?mode,
                phase = ?cursor.phase(),
                "Fetched batch"
            );

            // Legacy backends already applied the skip through the offset.
            if mode.is_legacy() {
                cursor.pending_skip = 0;
            }

            if cursor.pending_skip > 0 {
                if issues.is_empty() {
                    break;
                }

                let len = issues.len() as u64;
                if cursor.pending_skip >= len {
                    cursor.pending_skip -= len;
                    stats.skipped += len;
                    if cursor.advance(&mode, options.page_size).is_done() {
                        break;
                    }
                    continue;
                }

                issues = issues.split_off(cursor.pending_skip as usize);
                stats.skipped += cursor.pending_skip;
                cursor.pending_skip = 0;
            }

            stats.emitted += issues.len() as u64;
            accumulated.extend(issues);

            debug!(
                retrieved = stats.emitted,
                phase = ?RunPhase::Emitting,
                "Accumulated issues"
            );

            if !options.fetch_all {
                break;
            }

            if cursor.advance(&mode, options.page_size).is_done() {
                break;
            }
        }

        info!(
            pages = stats.pages,
            skipped = stats.skipped,
            issues = stats.emitted,
            phase = ?RunPhase::Done,
            "Finished listing issues"
        );

        Ok((accumulated, stats))
    }
}
