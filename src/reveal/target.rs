//! One-shot reveal latch per observed element.
//!
//! ```text
//! Unobserved --mount--> Observing --ratio >= threshold--> Revealed
//! ```
//!
//! `Revealed` is terminal. Registration with the observer is released
//! exactly once, at the earlier of reveal or drop.
//!
//! Mounting hands the observer the sending half of the target's inbox.
//! Notifications queued there are applied by [`RevealTarget::pump`] or
//! awaited by [`RevealTarget::wait_revealed`].

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::debug;
use uuid::Uuid;

use super::observer::{Intersection, TargetId, VisibilityObserver};

/// Generic default threshold
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Threshold used by the entrance-animation presets
pub const PRESET_THRESHOLD: f64 = 0.08;

/// Threshold used by the stats band
pub const STATS_THRESHOLD: f64 = 0.2;

/// Lifecycle state of a [`RevealTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Created, not yet mounted
    Unobserved,

    /// Registered and waiting for visibility
    Observing,

    /// Became visible; never changes again
    Revealed,
}

/// An element whose first sufficient visibility flips a permanent latch
pub struct RevealTarget {
    id: TargetId,
    threshold: f64,
    state: RevealState,
    /// True while registered with the observer
    registered: bool,
    observer: Arc<dyn VisibilityObserver>,
    /// Notifications from the observer, present while registered
    inbox: Option<mpsc::UnboundedReceiver<Intersection>>,
    latch: watch::Sender<bool>,
}

impl RevealTarget {
    /// Create an unmounted target. `threshold` is clamped to 0-1.
    pub fn new(observer: Arc<dyn VisibilityObserver>, threshold: f64) -> Self {
        let (latch, _) = watch::channel(false);
        let threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };

        Self {
            id: Uuid::new_v4(),
            threshold,
            state: RevealState::Unobserved,
            registered: false,
            observer,
            inbox: None,
            latch,
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Receiver that changes exactly once, from false to true
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.latch.subscribe()
    }

    /// Register with the observer. No-op unless unobserved.
    pub fn mount(&mut self) {
        if self.state != RevealState::Unobserved {
            return;
        }

        let (sink, inbox) = mpsc::unbounded_channel();
        self.observer.observe(self.id, self.threshold, sink);
        self.inbox = Some(inbox);
        self.registered = true;
        self.state = RevealState::Observing;
    }

    /// Apply every notification already delivered by the observer.
    ///
    /// Returns true if one of them revealed the target.
    pub fn pump(&mut self) -> bool {
        let mut revealed = false;
        while let Some(entry) = self.inbox.as_mut().and_then(|inbox| inbox.try_recv().ok()) {
            revealed |= self.handle_intersection(entry);
        }
        revealed
    }

    /// Wait for the observer to deliver a revealing notification.
    ///
    /// Returns true once revealed, false if the target is not mounted or
    /// the observer stops delivering first.
    pub async fn wait_revealed(&mut self) -> bool {
        loop {
            if self.is_revealed() {
                return true;
            }
            let Some(inbox) = self.inbox.as_mut() else {
                return false;
            };
            let next = inbox.recv().await;
            match next {
                Some(entry) => {
                    self.handle_intersection(entry);
                }
                None => return false,
            }
        }
    }

    /// Feed a visibility notification.
    ///
    /// Returns true only for the notification that reveals the target.
    pub fn handle_intersection(&mut self, entry: Intersection) -> bool {
        if self.state != RevealState::Observing {
            return false;
        }

        if !entry.is_intersecting || entry.ratio < self.threshold {
            return false;
        }

        self.state = RevealState::Revealed;
        self.release();
        self.latch.send_replace(true);
        debug!(target_id = %self.id, ratio = entry.ratio, "revealed");
        true
    }

    /// Destroy the target, releasing its registration if still held
    pub fn unmount(self) {}

    fn release(&mut self) {
        self.inbox = None;
        if self.registered {
            self.registered = false;
            self.observer.unobserve(self.id);
        }
    }
}

impl Drop for RevealTarget {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for RevealTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealTarget")
            .field("id", &self.id)
            .field("threshold", &self.threshold)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::ObserverRegistry;

    #[test]
    fn test_mount_registers_with_threshold() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry.clone(), STATS_THRESHOLD);

        assert_eq!(target.state(), RevealState::Unobserved);
        assert!(!registry.is_observing(target.id()));

        target.mount();
        assert_eq!(target.state(), RevealState::Observing);
        assert_eq!(registry.threshold_of(target.id()), Some(0.2));

        // Mounting twice does not re-register.
        target.mount();
        assert_eq!(registry.observed_count(), 1);
    }

    #[test]
    fn test_below_threshold_does_not_reveal() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry.clone(), 0.5);
        target.mount();

        assert!(!target.handle_intersection(Intersection::visible(0.49)));
        assert!(!target.is_revealed());

        assert!(target.handle_intersection(Intersection::visible(0.5)));
        assert!(target.is_revealed());
        assert!(!registry.is_observing(target.id()));
    }

    #[test]
    fn test_zero_threshold_needs_intersection() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry, 0.0);
        target.mount();

        assert!(!target.handle_intersection(Intersection::hidden()));
        assert!(target.handle_intersection(Intersection {
            ratio: 0.0,
            is_intersecting: true,
        }));
    }

    #[test]
    fn test_unmounted_target_ignores_notifications() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry, 0.1);

        assert!(!target.handle_intersection(Intersection::visible(1.0)));
        assert_eq!(target.state(), RevealState::Unobserved);
    }

    #[test]
    fn test_pump_applies_delivered_notifications() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry.clone(), 0.3);
        target.mount();

        assert!(registry.notify(target.id(), Intersection::visible(0.1)));
        assert!(!target.pump());
        assert_eq!(target.state(), RevealState::Observing);

        registry.notify(target.id(), Intersection::visible(0.2));
        registry.notify(target.id(), Intersection::visible(0.6));
        registry.notify(target.id(), Intersection::hidden());
        assert!(target.pump());
        assert!(target.is_revealed());

        // Registration is gone, so later events never reach the target.
        assert!(!registry.notify(target.id(), Intersection::visible(1.0)));
        assert!(!target.pump());
    }

    #[tokio::test]
    async fn test_wait_revealed_on_unmounted_target() {
        let registry = Arc::new(ObserverRegistry::new());
        let mut target = RevealTarget::new(registry, 0.1);

        assert!(!target.wait_revealed().await);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let registry: Arc<ObserverRegistry> = Arc::new(ObserverRegistry::new());
        assert_eq!(RevealTarget::new(registry.clone(), 1.7).threshold(), 1.0);
        assert_eq!(RevealTarget::new(registry.clone(), -0.3).threshold(), 0.0);
        assert_eq!(RevealTarget::new(registry, f64::NAN).threshold(), DEFAULT_THRESHOLD);
    }
}
