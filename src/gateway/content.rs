//! Content gateway: cached, soft-failing reads from a content source.
//!
//! Every read consults the injected [`ResponseCache`] first. A fresh entry
//! is returned without touching the network. A stale or missing entry
//! triggers a fetch; success replaces the entry, failure falls back to
//! whatever is cached (serve-stale-on-error) or to an empty result.
//!
//! Concurrent reads of the same query are not de-duplicated. Each
//! completed fetch becomes a new entry and the cache keeps the one that
//! completed last (see [`ResponseCache::store`]).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::cache::{CacheEntry, QueryKey, ResponseCache};
use super::clock::{Clock, SystemClock};
use crate::adapters::ContentSource;
use crate::domain::ContentRecord;

/// Default time-to-live for cached responses (1 hour)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache holding raw source responses
pub type RecordCache = ResponseCache<Vec<ContentRecord>>;

type Entry = Arc<CacheEntry<Vec<ContentRecord>>>;

/// Outcome of a slug lookup that keeps the cause of absence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The slug resolved to a record
    Found(ContentRecord),

    /// The source answered and no record has this slug
    NotFound,

    /// The source could not be reached and nothing was cached
    Unreachable,
}

impl Lookup {
    /// Collapse into the plain found/not-found view
    pub fn into_record(self) -> Option<ContentRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound | Self::Unreachable => None,
        }
    }
}

/// Read-through gateway over a [`ContentSource`]
pub struct ContentGateway {
    source: Arc<dyn ContentSource>,
    cache: Arc<RecordCache>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
}

impl ContentGateway {
    /// Create a gateway with the system clock and the default TTL
    pub fn new(source: Arc<dyn ContentSource>, cache: Arc<RecordCache>) -> Self {
        Self {
            source,
            cache,
            clock: Arc::new(SystemClock),
            ttl: to_chrono(DEFAULT_TTL),
        }
    }

    /// Use a different clock for cache timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = to_chrono(ttl);
        self
    }

    /// The injected cache
    pub fn cache(&self) -> &Arc<RecordCache> {
        &self.cache
    }

    /// First page of records, newest first. Empty on failure.
    pub async fn list_records(&self, page_size: usize) -> Vec<ContentRecord> {
        self.list_page(page_size, 1).await
    }

    /// One page of records. Pages are 1-based. Empty on failure.
    pub async fn list_page(&self, page_size: usize, page: usize) -> Vec<ContentRecord> {
        let key = QueryKey::list(page_size.max(1), page.max(1));

        self.read_through(key)
            .await
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// The `count` most recent records, for the home page strip
    pub async fn latest_records(&self, count: usize) -> Vec<ContentRecord> {
        self.list_records(count).await
    }

    /// Resolve a slug. Absence and an unreachable source both give `None`.
    pub async fn get_record_by_slug(&self, slug: &str) -> Option<ContentRecord> {
        self.resolve_slug(slug).await.into_record()
    }

    /// Resolve a slug, reporting why a record is missing
    pub async fn resolve_slug(&self, slug: &str) -> Lookup {
        match self.read_through(QueryKey::by_slug(slug)).await {
            Some(entry) => match entry.value().first() {
                Some(record) => Lookup::Found(record.clone()),
                None => Lookup::NotFound,
            },
            None => Lookup::Unreachable,
        }
    }

    /// Cached or freshly fetched entry for `key`; `None` only when the
    /// fetch failed and nothing was cached.
    async fn read_through(&self, key: QueryKey) -> Option<Entry> {
        if let Some(entry) = self.cache.peek(&key) {
            if entry.is_fresh(self.clock.now()) {
                debug!(query = %key, fetched_at = %entry.fetched_at(), "cache hit");
                return Some(entry);
            }
        }

        let result = match &key {
            QueryKey::List { page_size, page } => self.source.fetch_page(*page_size, *page).await,
            QueryKey::BySlug(slug) => self.source.fetch_by_slug(slug).await,
        };

        match result {
            Ok(records) => {
                let entry = Arc::new(CacheEntry::new(records, self.clock.now(), self.ttl));
                let stored = self.cache.store(key.clone(), entry.clone());
                debug!(
                    query = %key,
                    source = self.source.name(),
                    records = entry.value().len(),
                    stored,
                    "fetched"
                );
                Some(entry)
            }
            Err(e) => {
                // Re-read: a concurrent fetch may have landed while this one failed.
                match self.cache.peek(&key) {
                    Some(entry) => {
                        warn!(
                            query = %key,
                            source = self.source.name(),
                            timeout = e.is_timeout(),
                            fetched_at = %entry.fetched_at(),
                            "fetch failed, serving cached value: {}",
                            e
                        );
                        Some(entry)
                    }
                    None => {
                        warn!(
                            query = %key,
                            source = self.source.name(),
                            timeout = e.is_timeout(),
                            "fetch failed with nothing cached: {}",
                            e
                        );
                        None
                    }
                }
            }
        }
    }
}

fn to_chrono(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365 * 1_000))
}
