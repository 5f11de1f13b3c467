//! Visibility-observation facility.
//!
//! Targets register with a [`VisibilityObserver`] on mount and unregister
//! once revealed or destroyed. Registration hands the observer a sender;
//! the platform (or a test) delivers [`Intersection`] notifications
//! through it to the target that owns the id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::trace;
use uuid::Uuid;

/// Opaque handle identifying an observed element
pub type TargetId = Uuid;

/// One visibility notification for an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Fraction of the element's area inside the viewport (0-1)
    pub ratio: f64,

    /// Whether the element intersects the viewport at all
    pub is_intersecting: bool,
}

impl Intersection {
    /// Element is `ratio` visible
    pub fn visible(ratio: f64) -> Self {
        Self {
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    /// Element left the viewport
    pub fn hidden() -> Self {
        Self {
            ratio: 0.0,
            is_intersecting: false,
        }
    }
}

/// Channel end an observer delivers notifications into
pub type IntersectionSink = mpsc::UnboundedSender<Intersection>;

/// Shared facility that watches elements for visibility changes
pub trait VisibilityObserver: Send + Sync {
    /// Start delivering notifications for `target` into `sink`
    fn observe(&self, target: TargetId, threshold: f64, sink: IntersectionSink);

    /// Stop delivering notifications for `target`
    fn unobserve(&self, target: TargetId);
}

#[derive(Debug)]
struct Registration {
    threshold: f64,
    sink: IntersectionSink,
}

/// In-process observer keyed by target id.
///
/// Headless renderers use it as-is (nothing ever scrolls into view);
/// embedders and tests fire events into it with [`ObserverRegistry::notify`].
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observed: Mutex<HashMap<TargetId, Registration>>,
    unobserve_calls: AtomicUsize,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self, target: TargetId) -> bool {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&target)
    }

    /// Threshold `target` registered with, if it is registered
    pub fn threshold_of(&self, target: TargetId) -> Option<f64> {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&target)
            .map(|registration| registration.threshold)
    }

    /// Number of currently registered targets
    pub fn observed_count(&self) -> usize {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Total `unobserve` calls received
    pub fn unobserve_calls(&self) -> usize {
        self.unobserve_calls.load(Ordering::SeqCst)
    }

    /// Deliver `entry` to `target`.
    ///
    /// Returns false, dropping the notification, if the target is not
    /// registered or its receiving end is gone.
    pub fn notify(&self, target: TargetId, entry: Intersection) -> bool {
        let observed = self.observed.lock().unwrap_or_else(PoisonError::into_inner);

        match observed.get(&target) {
            Some(registration) => registration.sink.send(entry).is_ok(),
            None => {
                trace!(target_id = %target, "notification for unregistered target dropped");
                false
            }
        }
    }

    /// Deliver `entry` to every registered target, e.g. after a scroll.
    ///
    /// Returns how many targets received it.
    pub fn notify_all(&self, entry: Intersection) -> usize {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|registration| registration.sink.send(entry).is_ok())
            .count()
    }
}

impl VisibilityObserver for ObserverRegistry {
    fn observe(&self, target: TargetId, threshold: f64, sink: IntersectionSink) {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(target, Registration { threshold, sink });
    }

    fn unobserve(&self, target: TargetId) {
        self.unobserve_calls.fetch_add(1, Ordering::SeqCst);
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&target);
    }
}
