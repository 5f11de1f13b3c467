//! pressroom - Content gateway and progressive reveal engine
//!
//! The engineering core of an agency brochure site: blog content synced
//! from a headless CMS, and the client-side machinery that reveals page
//! sections as they scroll into view.
//!
//! # Architecture
//!
//! ```text
//! ContentSource ──> ContentGateway ──> PathEnumerator      (slugs to pre-render)
//!   (WordPress)      (TTL cache)   └─> MetadataSynthesizer (document head)
//!
//! VisibilityObserver ──> RevealTarget ──latch──> CountUp  (stat counters)
//!                                     └────────> RevealAnimation
//! ```
//!
//! - Content reads never fail: transport errors degrade to cached or
//!   empty results
//! - Reveal latches flip once and never revert
//! - Count-up values are a pure function of elapsed time
//!
//! # Modules
//!
//! - `adapters`: Content sources (WordPress REST, in-memory)
//! - `gateway`: Read-through cache with serve-stale-on-error
//! - `paths`: Static path enumeration
//! - `metadata`: Page metadata, reading time, excerpts
//! - `reveal`: Viewport reveal state machine and presets
//! - `countup`: Eased numeric count-up
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Slugs to pre-render
//! pressroom paths
//!
//! # Head metadata for one article
//! pressroom meta growth-hacks
//!
//! # Offline, from a fixture
//! pressroom --fixture posts.json latest
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod countup;
pub mod domain;
pub mod gateway;
pub mod metadata;
pub mod paths;
pub mod reveal;

// Re-export main types at crate root for convenience
pub use adapters::{ContentSource, SourceError, StaticSource, WordPressSource};
pub use countup::{CountUp, Frame, Stat};
pub use domain::{ContentRecord, HeroImage, Metadata, OpenGraph, RecordId};
pub use gateway::{CacheEntry, ContentGateway, Lookup, QueryKey, RecordCache, ResponseCache};
pub use metadata::{reading_time_minutes, MetadataSynthesizer};
pub use paths::{PathEnumerator, StaticParam};
pub use reveal::{Intersection, ObserverRegistry, RevealAnimation, RevealStyle, RevealTarget, VisibilityObserver};
