//! In-memory content source.
//!
//! Serves a fixed corpus with the same paging and slug-filter semantics
//! as the WordPress adapter. Used by the `--fixture` CLI flag for offline
//! builds and by tests, which can also flip it into a failing state.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{ContentSource, SourceError};
use crate::domain::ContentRecord;

/// Content source backed by a vector of records
#[derive(Debug, Default)]
pub struct StaticSource {
    /// Records, kept newest first
    records: RwLock<Vec<ContentRecord>>,
    /// When set, every request fails as if the CMS were down
    unavailable: AtomicBool,
    page_requests: AtomicUsize,
    slug_requests: AtomicUsize,
}

impl StaticSource {
    /// Create a source serving `records`
    pub fn new(records: Vec<ContentRecord>) -> Self {
        let source = Self::default();
        source.set_records(records);
        source
    }

    /// Load a JSON array of records from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture: {}", path.display()))?;

        let records: Vec<ContentRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture: {}", path.display()))?;

        Ok(Self::new(records))
    }

    /// Replace the corpus (e.g. to simulate a slug rename upstream)
    pub fn set_records(&self, mut records: Vec<ContentRecord>) {
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }

    /// Make subsequent requests fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of page requests received so far
    pub fn page_requests(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    /// Number of slug requests received so far
    pub fn slug_requests(&self) -> usize {
        self.slug_requests.load(Ordering::SeqCst)
    }

    /// Total requests of either kind
    pub fn total_requests(&self) -> usize {
        self.page_requests() + self.slug_requests()
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("static source switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_page(
        &self,
        page_size: usize,
        page: usize,
    ) -> Result<Vec<ContentRecord>, SourceError> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let skip = page.saturating_sub(1).saturating_mul(page_size);

        Ok(records.iter().skip(skip).take(page_size).cloned().collect())
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Vec<ContentRecord>, SourceError> {
        self.slug_requests.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.iter().filter(|r| r.slug == slug).cloned().collect())
    }
}
