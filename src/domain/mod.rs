//! Domain types for pressroom.
//!
//! This module contains the core data structures:
//! - Record: Published articles resolved from the content source
//! - Wire: WordPress REST response shapes
//! - Page: Document head metadata derived from records

pub mod page;
pub mod record;
pub mod wire;

// Re-export commonly used types
pub use page::{Metadata, OpenGraph, PreviewImage, NOT_FOUND_TITLE};
pub use record::{ContentRecord, HeroImage, RecordId};
pub use wire::WpPost;
