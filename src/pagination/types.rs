//! Pagination types
//!
//! Batch classification, cursor state and fetch options.

use serde_json::Value;

/// Response key carrying the continuation token
pub(crate) const NEXT_PAGE_TOKEN: &str = "nextPageToken";
/// Response key carrying the last-page flag
pub(crate) const IS_LAST: &str = "isLast";
/// Response key carrying the legacy total count
pub(crate) const TOTAL: &str = "total";
/// Response key carrying the records
pub(crate) const ISSUES: &str = "issues";

/// Pagination style of a single batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    /// Offset pagination bounded by a total count
    Legacy {
        /// Total number of matching records
        total: u64,
    },
    /// Continuation-token pagination
    Token {
        /// Token for the next batch, absent when the backend has no more
        next_page_token: Option<String>,
        /// Backend says this is the final batch
        is_last: bool,
    },
}

impl PageMode {
    /// Classify a raw batch by which pagination keys it carries
    ///
    /// A `nextPageToken` or `isLast` key makes the batch token-mode even if a
    /// `total` is also present. Otherwise a `total` key makes it legacy-mode.
    /// A batch with neither is treated as a final token-mode batch.
    pub fn classify(body: &Value) -> Self {
        let has = |key: &str| body.get(key).is_some();

        if has(NEXT_PAGE_TOKEN) || has(IS_LAST) {
            return PageMode::Token {
                next_page_token: body
                    .get(NEXT_PAGE_TOKEN)
                    .and_then(Value::as_str)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string),
                is_last: body.get(IS_LAST).and_then(Value::as_bool) == Some(true),
            };
        }

        if has(TOTAL) {
            return PageMode::Legacy {
                total: body.get(TOTAL).map_or(0, as_count),
            };
        }

        PageMode::Token {
            next_page_token: None,
            is_last: false,
        }
    }

    /// Whether the batch carried any pagination metadata at all
    pub fn has_metadata(body: &Value) -> bool {
        [NEXT_PAGE_TOKEN, IS_LAST, TOTAL]
            .iter()
            .any(|key| body.get(key).is_some())
    }

    /// Check if this is legacy-mode
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy { .. })
    }

    /// Check if this is token-mode
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}

fn as_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|f| f.max(0.0) as u64))
        .unwrap_or(0)
}

/// One collaborator response split into records and pagination mode
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Records in backend order, untouched
    pub issues: Vec<Value>,
    /// Pagination style of this batch
    pub mode: PageMode,
    /// False when the response had no pagination keys at all
    pub well_formed: bool,
}

impl Batch {
    /// Split a raw response
    ///
    /// A missing or non-array `issues` field yields no records.
    pub fn from_response(mut body: Value) -> Self {
        let mode = PageMode::classify(&body);
        let well_formed = PageMode::has_metadata(&body);
        let issues = match body.get_mut(ISSUES).map(Value::take) {
            Some(Value::Array(issues)) => issues,
            _ => Vec::new(),
        };

        Self {
            issues,
            mode,
            well_formed,
        }
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether the batch has no records
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of advancing the cursor past a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch another batch
    Continue,
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Still discarding leading records
    Skipping,
    /// Collecting records
    Emitting,
    /// Loop has terminated
    Done,
}

/// Running state threaded across batch fetches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Offset for the next legacy-mode request
    pub offset: u64,
    /// Token for the next token-mode request
    pub token: Option<String>,
    /// Records still to discard before output starts
    pub pending_skip: u64,
}

impl PaginationCursor {
    /// Cursor for a run that skips `start_at` leading records
    pub fn new(start_at: Option<u64>) -> Self {
        let start_at = start_at.unwrap_or(0);
        Self {
            offset: start_at,
            token: None,
            pending_skip: start_at,
        }
    }

    /// Current phase, derived from the pending skip
    pub fn phase(&self) -> RunPhase {
        if self.pending_skip > 0 {
            RunPhase::Skipping
        } else {
            RunPhase::Emitting
        }
    }
}

/// Options for one pagination run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Advisory sort key, forwarded to the collaborator
    pub order_by: Option<String>,
    /// Records requested per batch
    pub page_size: u32,
    /// Keep going past the first emitting batch
    pub fetch_all: bool,
    /// Field projection; `None` means the configured default
    pub fields: Option<Vec<String>>,
    /// Leading records to skip
    pub start_at: Option<u64>,
    /// Forwarded to the collaborator verbatim
    pub use_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            order_by: Some("updated".to_string()),
            page_size: 100,
            fetch_all: true,
            fields: None,
            start_at: None,
            use_cache: true,
        }
    }
}

impl FetchOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort key
    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Leave the query's own ordering alone
    #[must_use]
    pub fn unordered(mut self) -> Self {
        self.order_by = None;
        self
    }

    /// Set records per batch
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch every page, or stop after the first emitting batch
    #[must_use]
    pub fn fetch_all(mut self, fetch_all: bool) -> Self {
        self.fetch_all = fetch_all;
        self
    }

    /// Set an explicit field projection
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Skip leading records
    #[must_use]
    pub fn start_at(mut self, start_at: Option<u64>) -> Self {
        self.start_at = start_at;
        self
    }

    /// Allow cached responses
    #[must_use]
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// Counters for one pagination run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Batch fetches issued
    pub pages: u32,
    /// Records discarded by the logical skip
    pub skipped: u64,
    /// Records returned
    pub emitted: u64,
}
