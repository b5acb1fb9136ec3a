//! In-memory response cache for search calls
//!
//! Entries are keyed by [`IssueSearch::cache_key`] and expire after a fixed
//! TTL; expired entries are evicted on the next insert. A request with `use_cache = false`
//! skips the lookup but still refreshes the entry.

use super::types::{IssueSearch, PageRequest};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: Value,
    stored_at: DateTime<Utc>,
}

/// TTL cache of raw search responses
#[derive(Debug)]
pub struct SearchCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: chrono::Duration,
}

impl SearchCache {
    /// Create a cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Cache key from the serialized request, minus `use_cache`
    pub fn key(request: &PageRequest) -> Result<String> {
        Ok(serde_json::to_string(request)?)
    }

    /// Look up a live entry
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !self.is_expired(entry, Utc::now()))
            .map(|entry| entry.body.clone())
    }

    /// Store a response, evicting whatever has expired
    pub async fn insert(&self, key: String, body: Value) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !self.is_expired(entry, now));
        entries.insert(
            key,
            CacheEntry {
                body,
                stored_at: now,
            },
        );
    }

    /// Drop expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        before - entries.len()
    }

    /// Number of stored entries, live or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds nothing
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove everything
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) >= self.ttl
    }
}

/// Any [`IssueSearch`] with a response cache in front of it
#[derive(Debug)]
pub struct CachedSearch<S> {
    inner: S,
    cache: SearchCache,
}

impl<S: IssueSearch> CachedSearch<S> {
    /// Wrap `inner` with a cache of the given TTL
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: SearchCache::new(ttl),
        }
    }

    /// The cache itself
    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// The wrapped collaborator
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: IssueSearch> IssueSearch for CachedSearch<S> {
    async fn search(&self, request: &PageRequest) -> Result<Value> {
        let key = self.inner.cache_key(request)?;

        if request.use_cache {
            if let Some(body) = self.cache.get(&key).await {
                debug!(start_at = request.start_at, "Search cache hit");
                return Ok(body);
            }
        }

        let body = self.inner.search(request).await?;
        self.cache.insert(key, body.clone()).await;
        Ok(body)
    }

    fn cache_key(&self, request: &PageRequest) -> Result<String> {
        self.inner.cache_key(request)
    }
}
