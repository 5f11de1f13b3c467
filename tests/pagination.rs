//! Path Enumeration Integration Tests
//!
//! Tests for page-walk termination and soft-fail behavior when
//! enumerating slugs for pre-rendering.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use pressroom::adapters::StaticSource;
use pressroom::domain::ContentRecord;
use pressroom::gateway::{ContentGateway, RecordCache};
use pressroom::paths::PathEnumerator;

fn corpus(n: usize) -> Vec<ContentRecord> {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            ContentRecord::new(
                i.to_string(),
                format!("article-{:03}", i),
                format!("Article {}", i),
                base + Duration::hours(i as i64),
            )
        })
        .collect()
}

fn gateway_over(records: Vec<ContentRecord>) -> (Arc<StaticSource>, ContentGateway) {
    let source = Arc::new(StaticSource::new(records));
    let gateway = ContentGateway::new(source.clone(), Arc::new(RecordCache::new()));
    (source, gateway)
}

#[tokio::test]
async fn test_partial_page_needs_one_request() {
    let (source, gateway) = gateway_over(corpus(99));

    let slugs = PathEnumerator::new(&gateway)
        .with_page_size(100)
        .enumerate_slugs()
        .await;

    assert_eq!(slugs.len(), 99);
    assert_eq!(source.page_requests(), 1);
}

#[tokio::test]
async fn test_exactly_full_page_needs_two_requests() {
    let (source, gateway) = gateway_over(corpus(100));

    let slugs = PathEnumerator::new(&gateway)
        .with_page_size(100)
        .enumerate_slugs()
        .await;

    assert_eq!(slugs.len(), 100);
    assert_eq!(source.page_requests(), 2);
}

#[tokio::test]
async fn test_multiple_pages_are_collected() {
    let (source, gateway) = gateway_over(corpus(25));

    let slugs = PathEnumerator::new(&gateway)
        .with_page_size(10)
        .enumerate_slugs()
        .await;

    assert_eq!(slugs.len(), 25);
    assert!(slugs.contains("article-000"));
    assert!(slugs.contains("article-024"));
    assert_eq!(source.page_requests(), 3);
}

#[tokio::test]
async fn test_unreachable_source_yields_empty_set() {
    let (source, gateway) = gateway_over(corpus(10));
    source.set_unavailable(true);

    let slugs = PathEnumerator::new(&gateway).enumerate_slugs().await;

    assert!(slugs.is_empty());
    assert_eq!(source.page_requests(), 1);
}

#[tokio::test]
async fn test_empty_corpus_yields_empty_set() {
    let (_source, gateway) = gateway_over(Vec::new());

    assert!(PathEnumerator::new(&gateway).static_params().await.is_empty());
}

#[tokio::test]
async fn test_second_enumeration_is_served_from_cache() {
    let (source, gateway) = gateway_over(corpus(15));
    let enumerator = PathEnumerator::new(&gateway).with_page_size(10);

    let first = enumerator.enumerate_slugs().await;
    let second = enumerator.enumerate_slugs().await;

    assert_eq!(first, second);
    assert_eq!(source.page_requests(), 2);
}
