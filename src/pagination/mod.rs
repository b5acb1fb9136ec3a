//! Pagination module
//!
//! Drives a search collaborator across every batch of a query, whichever
//! pagination style the Jira deployment speaks.
//!
//! # Overview
//!
//! Jira search comes in two flavours:
//!
//! - **Legacy**: `startAt`/`maxResults` offsets with a `total` count
//! - **Token**: an opaque `nextPageToken` plus an `isLast` flag
//!
//! Each batch is classified into a [`PageMode`] from the keys it carries, and
//! the [`PaginationCursor`] advances with the strategy for that mode. A
//! logical start offset is pushed down to the server in legacy mode and
//! realized by discarding leading records client-side in token mode.

mod paginator;
mod strategies;
mod types;

pub use paginator::Paginator;
pub use strategies::{advance_legacy, advance_token};
pub use types::{
    Batch, FetchOptions, FetchStats, NextPage, PageMode, PaginationCursor, RunPhase,
};
