//! Static path enumeration for pre-rendering.
//!
//! Walks the gateway's paginated listing and collects every slug. A page
//! shorter than the requested size ends the walk, so an exactly-full
//! final page costs one extra (empty) request. Gateway failures surface
//! as empty pages, which also end the walk: fewer pages get pre-rendered,
//! nothing errors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gateway::ContentGateway;

/// Page size large enough to cover the expected corpus in one request
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest `per_page` WordPress accepts; bigger values are rejected with 400
pub const MAX_PAGE_SIZE: usize = 100;

/// Upper bound on pages requested in one enumeration
pub const DEFAULT_MAX_PAGES: usize = 50;

/// One entry handed to the static-generation driver
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticParam {
    pub slug: String,
}

/// Enumerates every addressable slug through a [`ContentGateway`]
pub struct PathEnumerator<'a> {
    gateway: &'a ContentGateway,
    page_size: usize,
    max_pages: usize,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(gateway: &'a ContentGateway) -> Self {
        Self {
            gateway,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Records per request, clamped to `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Collect all slugs. An empty set means "render nothing extra".
    pub async fn enumerate_slugs(&self) -> BTreeSet<String> {
        let mut slugs = BTreeSet::new();
        let mut pages = 0;

        for page in 1..=self.max_pages {
            let records = self.gateway.list_page(self.page_size, page).await;
            pages = page;
            let count = records.len();
            slugs.extend(records.into_iter().map(|r| r.slug));

            if count < self.page_size {
                info!(pages, slugs = slugs.len(), "enumerated static paths");
                return slugs;
            }
        }

        warn!(
            pages,
            slugs = slugs.len(),
            "stopped enumerating at the page limit; listing may be incomplete"
        );
        slugs
    }

    /// Slugs wrapped in the shape the static-generation driver expects
    pub async fn static_params(&self) -> Vec<StaticParam> {
        self.enumerate_slugs()
            .await
            .into_iter()
            .map(|slug| StaticParam { slug })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticSource;
    use crate::domain::ContentRecord;
    use crate::gateway::{QueryKey, RecordCache};
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_static_params_shape() {
        let source = Arc::new(StaticSource::new(vec![
            ContentRecord::new("2", "zeta", "Zeta", Utc::now()),
            ContentRecord::new("1", "alpha", "Alpha", Utc::now()),
        ]));
        let gateway = ContentGateway::new(source, Arc::new(RecordCache::new()));

        let params = PathEnumerator::new(&gateway).static_params().await;
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!([{ "slug": "alpha" }, { "slug": "zeta" }])
        );
    }

    #[tokio::test]
    async fn test_page_limit_stops_runaway_listing() {
        let records = (0..10)
            .map(|i| ContentRecord::new(i.to_string(), format!("p{}", i), "P", Utc::now()))
            .collect();
        let source = Arc::new(StaticSource::new(records));
        let gateway = ContentGateway::new(source.clone(), Arc::new(RecordCache::new()));

        let slugs = PathEnumerator::new(&gateway)
            .with_page_size(2)
            .with_max_pages(3)
            .enumerate_slugs()
            .await;

        assert_eq!(slugs.len(), 6);
        assert_eq!(source.page_requests(), 3);
    }

    #[tokio::test]
    async fn test_oversized_page_size_is_capped() {
        let records = (0..150)
            .map(|i| ContentRecord::new(i.to_string(), format!("p{}", i), "P", Utc::now()))
            .collect();
        let source = Arc::new(StaticSource::new(records));
        let gateway = ContentGateway::new(source.clone(), Arc::new(RecordCache::new()));

        let slugs = PathEnumerator::new(&gateway)
            .with_page_size(500)
            .enumerate_slugs()
            .await;

        assert_eq!(slugs.len(), 150);
        assert_eq!(source.page_requests(), 2);
        assert!(gateway.cache().peek(&QueryKey::list(MAX_PAGE_SIZE, 2)).is_some());
    }
}
