use std::time::Duration;

use lostfound_client::notifications::{
    NotificationCenter, NotificationEvent, Severity, DEFAULT_TTL,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::yield_now;
use tokio::time::advance;

fn drain(events: &mut UnboundedReceiver<NotificationEvent>) -> Vec<NotificationEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

#[tokio::test(start_paused = true)]
async fn notification_expires_after_default_ttl() {
    let (center, mut events) = NotificationCenter::new();

    center.success("Report submitted");
    assert_eq!(center.active().len(), 1);

    advance(DEFAULT_TTL - Duration::from_millis(1)).await;
    yield_now().await;
    assert_eq!(center.active().len(), 1, "must stay up until the TTL elapses");

    advance(Duration::from_millis(2)).await;
    yield_now().await;
    assert!(center.active().is_empty());

    let drained = drain(&mut events);
    assert_eq!(drained.len(), 2);
    assert!(matches!(&drained[0], NotificationEvent::Posted(n) if n.message == "Report submitted"));
    assert!(matches!(drained[1], NotificationEvent::Expired { .. }));
}

#[tokio::test(start_paused = true)]
async fn dismissal_beats_the_expiry_timer() {
    let (center, mut events) = NotificationCenter::new();

    let id = center.info("Match found");
    center.dismiss(id);
    assert!(center.active().is_empty());

    // The expiry timer still fires later; it must find nothing to do
    advance(DEFAULT_TTL + Duration::from_millis(100)).await;
    yield_now().await;

    let drained = drain(&mut events);
    assert_eq!(drained.len(), 2, "no event from the late timer");
    assert!(matches!(drained[0], NotificationEvent::Posted(_)));
    assert!(matches!(drained[1], NotificationEvent::Dismissed { id: gone } if gone == id));
}

#[tokio::test(start_paused = true)]
async fn dismissing_twice_is_a_noop() {
    let (center, mut events) = NotificationCenter::new();

    let id = center.warning("Item already claimed");
    center.dismiss(id);
    center.dismiss(id);

    let drained = drain(&mut events);
    assert_eq!(drained.len(), 2);
    assert!(matches!(drained[1], NotificationEvent::Dismissed { .. }));
}

#[tokio::test(start_paused = true)]
async fn concurrent_notifications_are_independent() {
    let (center, mut events) = NotificationCenter::new();

    let first = center.info("first");
    let second = center.info("second");
    let third = center.info("third");

    center.dismiss(second);

    let active = center.active();
    let ids: Vec<_> = active.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first, third], "insertion order survives a dismissal");

    advance(DEFAULT_TTL + Duration::from_millis(1)).await;
    yield_now().await;
    assert!(center.active().is_empty());

    let expired: Vec<_> = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, NotificationEvent::Expired { .. }))
        .collect();
    assert_eq!(expired.len(), 2, "the two undismissed notifications expire");
}

#[tokio::test(start_paused = true)]
async fn custom_ttl_overrides_the_default() {
    let (center, _events) = NotificationCenter::new();

    center.notify_with_ttl("quick", Severity::Info, Duration::from_millis(500));

    advance(Duration::from_millis(501)).await;
    yield_now().await;
    assert!(center.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn severity_is_carried_but_does_not_change_expiry() {
    let (center, mut events) = NotificationCenter::with_ttl(Duration::from_millis(1000));

    center.info("a");
    center.danger("b");

    match drain(&mut events).as_slice() {
        [NotificationEvent::Posted(first), NotificationEvent::Posted(second)] => {
            assert_eq!(first.severity, Severity::Info);
            assert_eq!(second.severity, Severity::Danger);
        }
        other => panic!("expected two posted events, got {:?}", other),
    }

    // Both expire together regardless of severity
    advance(Duration::from_millis(1001)).await;
    yield_now().await;
    assert!(center.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn notification_ids_are_unique() {
    let (center, _events) = NotificationCenter::new();

    let a = center.info("a");
    let b = center.info("b");
    let c = center.info("c");

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}
