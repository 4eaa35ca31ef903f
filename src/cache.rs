//! In-memory cache of scraped tracking results.
//!
//! Entries are keyed by tracking code and served while younger than the TTL.
//! Nothing is evicted: a stale entry is ignored on read and overwritten by the
//! next successful scrape, so the map grows for the lifetime of the process.
//!
//! The cache also tracks per-code flights so concurrent misses for the same
//! code share a single fetch and its outcome.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::{OnceCell, RwLock};

use crate::config::CACHE_TTL;
use crate::error_handling::TrackingError;
use crate::models::TrackingResponse;

/// A cached response and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: TrackingResponse,
    pub stored_at: Instant,
}

impl CacheEntry {
    pub fn new(data: TrackingResponse) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    /// True while the entry's age is strictly below `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// TTL-aware map from tracking code to the last successful scrape.
pub struct TrackingCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    in_flight: StdMutex<HashMap<String, Arc<OnceCell<FlightResult>>>>,
}

impl Default for TrackingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingCache {
    /// Creates a cache with the production TTL (2 minutes).
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        TrackingCache {
            ttl,
            entries: RwLock::new(HashMap::new()),
            in_flight: StdMutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the entry for `code` if one exists and is still fresh.
    pub async fn get(&self, code: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries
            .get(code)
            .filter(|entry| entry.is_fresh(self.ttl))
            .cloned()
    }

    /// Stores `data` for `code`, stamped with the current time. Last writer wins.
    pub async fn put(&self, code: &str, data: TrackingResponse) {
        let mut entries = self.entries.write().await;
        entries.insert(code.to_string(), CacheEntry::new(data));
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every entry. Returns how many were stored.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    /// Joins the fetch in progress for `code`, or starts a new one.
    ///
    /// Every request that joins before the fetch finishes receives its result,
    /// success or failure. A flight whose result is already known is replaced, so
    /// a failed fetch is never handed to later requests.
    pub fn join_flight(&self, code: &str) -> Flight<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let cell = in_flight
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()));
        if cell.initialized() {
            *cell = Arc::new(OnceCell::new());
        }

        Flight {
            cache: self,
            code: code.to_string(),
            cell: Arc::clone(cell),
        }
    }

    /// Number of codes with a fetch in progress.
    pub fn flights(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

/// Outcome of a primary fetch, shared by every request in the same flight.
pub type FlightResult = Result<TrackingResponse, Arc<TrackingError>>;

/// A request's membership in the fetch for one code. See [`TrackingCache::join_flight`].
pub struct Flight<'a> {
    cache: &'a TrackingCache,
    code: String,
    cell: Arc<OnceCell<FlightResult>>,
}

impl Flight<'_> {
    /// Runs `fetch` unless another member already is, then returns the shared result.
    ///
    /// If the member running `fetch` is cancelled, a waiting member takes over.
    pub async fn run<F, Fut>(&self, fetch: F) -> FlightResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FlightResult>,
    {
        self.cell.get_or_init(fetch).await.clone()
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .cache
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        // Only the map and this member still hold the cell
        let last = in_flight
            .get(&self.code)
            .is_some_and(|cell| Arc::ptr_eq(cell, &self.cell) && Arc::strong_count(cell) == 2);
        if last {
            in_flight.remove(&self.code);
        }
    }
}
