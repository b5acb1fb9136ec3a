//! Advancement strategies, one per pagination mode
//!
//! Both share the same contract: update the cursor for the next request and
//! report whether the run is finished.

use super::types::{NextPage, PageMode, PaginationCursor};

/// Advance a legacy-mode cursor by one page
///
/// The offset moves by the requested page size, not by the observed batch
/// length, and the run ends once it reaches `total`. The offset saturates at
/// `u64::MAX`, which is past any total.
pub fn advance_legacy(cursor: &mut PaginationCursor, total: u64, page_size: u32) -> NextPage {
    cursor.offset = cursor.offset.saturating_add(u64::from(page_size));
    if cursor.offset >= total {
        NextPage::Done
    } else {
        NextPage::Continue
    }
}

/// Advance a token-mode cursor by one page
///
/// The run ends when the backend flags the last page or hands back no token.
pub fn advance_token(
    cursor: &mut PaginationCursor,
    next_page_token: Option<String>,
    is_last: bool,
) -> NextPage {
    cursor.token = next_page_token;
    if is_last || cursor.token.is_none() {
        NextPage::Done
    } else {
        NextPage::Continue
    }
}

impl PaginationCursor {
    /// Advance past a batch of the given mode
    pub fn advance(&mut self, mode: &PageMode, page_size: u32) -> NextPage {
        match mode {
            PageMode::Legacy { total } => advance_legacy(self, *total, page_size),
            PageMode::Token {
                next_page_token,
                is_last,
            } => advance_token(self, next_page_token.clone(), *is_last),
        }
    }
}
