//! Read-through response cache.
//!
//! Entries are immutable. A successful fetch produces a new entry that
//! replaces the previous one for the same query; nothing is ever evicted.
//! Staleness is a pure function of `now` against `fresh_until`.
//!
//! Ordering between entries uses a process-wide sequence number taken at
//! construction, not `fetched_at`: the wall clock may step backwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

/// Logical query a cached response answers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// One page of the newest-first listing
    List { page_size: usize, page: usize },

    /// Records filtered by slug
    BySlug(String),
}

impl QueryKey {
    pub fn list(page_size: usize, page: usize) -> Self {
        Self::List { page_size, page }
    }

    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self::BySlug(slug.into())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { page_size, page } => write!(f, "list(per_page={}, page={})", page_size, page),
            Self::BySlug(slug) => write!(f, "by_slug({})", slug),
        }
    }
}

/// Source of entry sequence numbers
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A fetched value and the window during which it is fresh
#[derive(Debug)]
pub struct CacheEntry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
    fresh_until: DateTime<Utc>,
    /// Construction order, strictly increasing across the process
    seq: u64,
}

impl<T> CacheEntry<T> {
    /// Wrap a value fetched at `fetched_at`, fresh for `ttl`.
    ///
    /// Build the entry when the fetch completes: construction order is
    /// what [`ResponseCache::store`] compares.
    pub fn new(value: T, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        let fresh_until = fetched_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            fetched_at,
            fresh_until,
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn fresh_until(&self) -> DateTime<Utc> {
        self.fresh_until
    }

    /// Fresh strictly before `fresh_until`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.fresh_until
    }
}

/// Process-wide cache of responses keyed by logical query.
///
/// Writers replace whole entries. A write only lands if its entry was
/// built after the one already present, so the fetch that completes last
/// wins regardless of when it started or what the wall clock says.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: RwLock<HashMap<QueryKey, Arc<CacheEntry<T>>>>,
}

impl<T> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResponseCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Current entry for `key`, fresh or not
    pub fn peek(&self, key: &QueryKey) -> Option<Arc<CacheEntry<T>>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store `entry` unless a later-built one is already present.
    ///
    /// Returns true if the entry was written.
    pub fn store(&self, key: QueryKey, entry: Arc<CacheEntry<T>>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = entries.get(&key) {
            if existing.seq > entry.seq {
                return false;
            }
        }

        entries.insert(key, entry);
        true
    }

    /// Number of cached queries
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
