//! Content synchronization gateway.
//!
//! This module contains:
//! - Clock: Injectable wall clock for cache timestamps
//! - Cache: Immutable entries keyed by logical query
//! - Content: The read-through, soft-failing gateway itself

pub mod cache;
pub mod clock;
pub mod content;

// Re-export commonly used types
pub use cache::{CacheEntry, QueryKey, ResponseCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use content::{ContentGateway, Lookup, RecordCache, DEFAULT_TTL};
