//! Viewport-triggered progressive reveal.
//!
//! Each [`RevealTarget`] owns a one-shot latch that flips the first time
//! its element is at least `threshold` visible. Targets share nothing
//! with each other; the only shared piece is the [`VisibilityObserver`]
//! they register with. It is injected, and delivers notifications over a
//! per-target channel, so tests and headless renderers can fire
//! visibility events synthetically through [`ObserverRegistry::notify`].
//!
//! Consumers subscribe to the latch and map it to a [`Presentation`] via
//! a [`RevealAnimation`] preset.

pub mod motion;
pub mod observer;
pub mod target;

// Re-export key types
pub use motion::{CubicBezier, Presentation, RevealAnimation, RevealStyle, SMOOTH_OUT, SPRING_OUT};
pub use observer::{Intersection, IntersectionSink, ObserverRegistry, TargetId, VisibilityObserver};
pub use target::{RevealState, RevealTarget, DEFAULT_THRESHOLD, PRESET_THRESHOLD, STATS_THRESHOLD};
