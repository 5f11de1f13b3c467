//! Reveal Integration Tests
//!
//! Tests for the one-shot reveal latch, observer registration lifecycle,
//! and the count-up animator driven by a reveal latch.

use std::sync::Arc;
use std::time::Duration;

use pressroom::countup::{value_at, CountUp, Frame, Stat};
use pressroom::reveal::{
    Intersection, ObserverRegistry, RevealAnimation, RevealState, RevealStyle, RevealTarget,
    PRESET_THRESHOLD, STATS_THRESHOLD,
};

#[test]
fn test_latch_never_reverts() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut target = RevealTarget::new(registry.clone(), 0.1);
    target.mount();

    registry.notify(target.id(), Intersection::visible(0.4));
    assert!(target.pump());

    for entry in [
        Intersection::hidden(),
        Intersection::visible(0.05),
        Intersection::visible(1.0),
        Intersection::hidden(),
    ] {
        registry.notify(target.id(), entry);
        assert!(!target.pump());
        assert!(!target.handle_intersection(entry));
        assert!(target.is_revealed());
    }
    assert_eq!(target.state(), RevealState::Revealed);
}

#[test]
fn test_subscriber_sees_exactly_one_change() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut target = RevealTarget::new(registry.clone(), 0.1);
    let mut rx = target.subscribe();
    target.mount();

    assert!(!*rx.borrow());
    assert!(!rx.has_changed().unwrap());

    registry.notify(target.id(), Intersection::visible(0.5));
    target.pump();
    assert!(rx.has_changed().unwrap());
    assert!(*rx.borrow_and_update());

    registry.notify(target.id(), Intersection::hidden());
    registry.notify(target.id(), Intersection::visible(0.9));
    target.pump();
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn test_unregisters_once_on_reveal_then_drop() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut target = RevealTarget::new(registry.clone(), 0.1);
    let id = target.id();
    target.mount();
    assert!(registry.is_observing(id));

    registry.notify(id, Intersection::visible(0.2));
    target.pump();
    assert!(!registry.is_observing(id));
    assert_eq!(registry.unobserve_calls(), 1);

    // Destroying an already-revealed target does not unregister again.
    target.unmount();
    assert_eq!(registry.unobserve_calls(), 1);
}

#[test]
fn test_unmount_before_reveal_unregisters() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut target = RevealTarget::new(registry.clone(), 0.1);
    let id = target.id();
    target.mount();

    target.unmount();
    assert!(!registry.is_observing(id));
    assert_eq!(registry.unobserve_calls(), 1);
    assert!(!registry.notify(id, Intersection::visible(1.0)));
}

#[test]
fn test_never_mounted_target_never_unregisters() {
    let registry = Arc::new(ObserverRegistry::new());
    drop(RevealTarget::new(registry.clone(), 0.1));
    assert_eq!(registry.unobserve_calls(), 0);
}

#[test]
fn test_targets_are_independent() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut first = RevealTarget::new(registry.clone(), PRESET_THRESHOLD);
    let mut second = RevealTarget::new(registry.clone(), PRESET_THRESHOLD);
    first.mount();
    second.mount();
    assert_eq!(registry.observed_count(), 2);

    registry.notify(first.id(), Intersection::visible(0.5));
    first.pump();
    second.pump();

    assert!(first.is_revealed());
    assert!(!second.is_revealed());
    assert!(registry.is_observing(second.id()));
    assert_eq!(registry.observed_count(), 1);
}

#[test]
fn test_broadcast_reveals_only_targets_past_threshold() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut low = RevealTarget::new(registry.clone(), PRESET_THRESHOLD);
    let mut high = RevealTarget::new(registry.clone(), 0.5);
    low.mount();
    high.mount();

    assert_eq!(registry.notify_all(Intersection::visible(0.3)), 2);
    assert!(low.pump());
    assert!(!high.pump());

    assert_eq!(registry.notify_all(Intersection::visible(0.8)), 1);
    assert!(high.pump());
}

#[tokio::test]
async fn test_wait_revealed_resolves_on_platform_event() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut target = RevealTarget::new(registry.clone(), STATS_THRESHOLD);
    target.mount();
    let id = target.id();

    let waiter = tokio::spawn(async move {
        let revealed = target.wait_revealed().await;
        (revealed, target)
    });

    registry.notify(id, Intersection::visible(0.1));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    registry.notify(id, Intersection::visible(0.25));
    let (revealed, target) = waiter.await.unwrap();

    assert!(revealed);
    assert!(target.is_revealed());
    assert!(!registry.is_observing(id));
}

#[test]
fn test_animation_preset_follows_latch() {
    let registry = Arc::new(ObserverRegistry::new());
    let anim = RevealAnimation::new(RevealStyle::FadeRight).with_delay(200);
    let mut target = anim.target(registry.clone());
    target.mount();

    assert_eq!(target.threshold(), PRESET_THRESHOLD);
    assert_eq!(anim.presentation(target.is_revealed()).opacity, 0.0);

    registry.notify(target.id(), Intersection::visible(0.1));
    target.pump();
    let shown = anim.presentation(target.is_revealed());
    assert_eq!(shown.opacity, 1.0);
    assert_eq!(shown.transform, "translateX(0px)");
    assert!(shown.to_css().contains("200ms"));
}

#[test]
fn test_count_up_completion_profile() {
    let mut counter = CountUp::new(500, Duration::from_millis(2200));

    assert_eq!(counter.frame(0.0, true), Frame::Running);
    assert_eq!(counter.current(), 0);

    let mut previous = 0;
    for t in (10..2200).step_by(10) {
        assert_eq!(counter.frame(t as f64, true), Frame::Running);
        assert!(counter.current() >= previous);
        assert!(counter.current() <= 500);
        previous = counter.current();
    }

    assert_eq!(counter.frame(2200.0, true), Frame::Complete);
    assert_eq!(counter.current(), 500);
    assert_eq!(value_at(5000.0, 2200.0, 500), 500);
}

#[tokio::test]
async fn test_reveal_latch_drives_count_up() {
    let registry = Arc::new(ObserverRegistry::new());
    let mut section = RevealTarget::new(registry.clone(), STATS_THRESHOLD);
    section.mount();

    let stat = Stat::new(150, "+", "Global Clients");
    let trigger = section.subscribe();
    let mut counter = CountUp::new(stat.value, Duration::from_millis(60));

    let task = tokio::spawn(async move {
        let mut frames = Vec::new();
        let last = counter
            .animate(trigger, Duration::from_millis(5), |v| frames.push(v))
            .await;
        (last, frames)
    });

    // Not visible enough yet: the animation must not start.
    registry.notify(section.id(), Intersection::visible(0.1));
    section.pump();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!task.is_finished());

    registry.notify(section.id(), Intersection::visible(0.3));
    section.pump();
    let (last, frames) = task.await.unwrap();

    assert_eq!(last, 150);
    assert_eq!(stat.display(last), "150+");
    assert_eq!(frames.last(), Some(&150));
    assert!(frames.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_count_up_without_trigger_stays_at_zero() {
    let registry = Arc::new(ObserverRegistry::new());
    let section = RevealTarget::new(registry, STATS_THRESHOLD);
    let trigger = section.subscribe();

    // Element destroyed before ever becoming visible.
    drop(section);

    let mut counter = CountUp::new(300, Duration::from_millis(50));
    let last = counter.animate(trigger, Duration::from_millis(5), |_| {}).await;

    assert_eq!(last, 0);
    assert!(!counter.is_started());
}
