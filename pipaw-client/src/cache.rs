//! TTL memoization of single-record lookups.
//!
//! Feeds are never cached: a page is only meaningful for the cursor and
//! rank token it was requested with.

use crate::api::ApiClient;
use crate::config::CacheConfig;
use crate::error::ClientResult;
use pipaw_types::{Pk, RankToken};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// A cached value together with the moment it was stored.
#[derive(Debug, Clone)]
pub struct TimedEntry<T> {
    value: T,
    ttl: Duration,
    created: Instant,
}

impl<T> TimedEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            ttl,
            created: Instant::now(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// True once the TTL has fully elapsed.
    pub fn expired(&self) -> bool {
        self.created.elapsed() >= self.ttl
    }
}

type Table = Mutex<HashMap<Pk, TimedEntry<Value>>>;

/// Wraps an [`ApiClient`], memoizing `media_info` and `user_info` per pk.
pub struct CachedClient<C> {
    inner: C,
    ttl: Duration,
    enabled: bool,
    media: Table,
    users: Table,
}

impl<C: ApiClient> CachedClient<C> {
    /// Creates an enabled cache with the given TTL.
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            enabled: true,
            media: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a cache from the `cache` section of a client config.
    pub fn from_config(inner: C, config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(inner, config.ttl())
        }
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drops any cached response for `pk`, so the next lookup refetches.
    pub fn invalidate(&self, pk: Pk) {
        lock(&self.media).remove(&pk);
        lock(&self.users).remove(&pk);
    }

    /// Drops every cached response.
    pub fn clear(&self) {
        lock(&self.media).clear();
        lock(&self.users).clear();
    }

    /// Number of cached responses that are still fresh.
    pub fn len(&self) -> usize {
        let fresh = |table: &Table| lock(table).values().filter(|e| !e.expired()).count();
        fresh(&self.media) + fresh(&self.users)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries held in memory, expired ones not yet pruned included.
    pub fn stored(&self) -> usize {
        lock(&self.media).len() + lock(&self.users).len()
    }

    fn cached(
        &self,
        table: &Table,
        endpoint: &'static str,
        pk: Pk,
        fetch: impl FnOnce() -> ClientResult<Value>,
    ) -> ClientResult<Value> {
        if !self.enabled {
            return fetch();
        }
        if let Some(entry) = lock(table).get(&pk).filter(|e| !e.expired()) {
            debug!(endpoint, %pk, "cache hit");
            return Ok(entry.value().clone());
        }
        debug!(endpoint, %pk, "cache miss");
        // The lock is not held across the fetch; a failed fetch leaves no entry.
        let value = fetch()?;
        let mut table = lock(table);
        table.retain(|_, entry| !entry.expired());
        table.insert(pk, TimedEntry::new(value.clone(), self.ttl));
        Ok(value)
    }
}

fn lock(table: &Table) -> std::sync::MutexGuard<'_, HashMap<Pk, TimedEntry<Value>>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C: ApiClient> ApiClient for CachedClient<C> {
    fn media_info(&self, pk: Pk) -> ClientResult<Value> {
        self.cached(&self.media, "media_info", pk, || self.inner.media_info(pk))
    }

    fn user_info(&self, pk: Pk) -> ClientResult<Value> {
        self.cached(&self.users, "user_info", pk, || self.inner.user_info(pk))
    }

    fn user_feed(
        &self,
        pk: Pk,
        rank_token: &RankToken,
        max_id: Option<&str>,
    ) -> ClientResult<Value> {
        self.inner.user_feed(pk, rank_token, max_id)
    }

    fn media_comments(&self, pk: Pk, max_id: Option<&str>) -> ClientResult<Value> {
        self.inner.media_comments(pk, max_id)
    }

    fn new_rank_token(&self) -> RankToken {
        self.inner.new_rank_token()
    }
}
