//! Transient user-visible notifications
//!
//! The center owns the set of active notifications and their expiry
//! timers. It never renders anything: state transitions go out on an
//! event channel and the presentation layer draws whatever it receives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long a notification stays up when nobody dismisses it.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Identifies one notification for dismissal.
pub type NotificationId = u64;

/// Severity of a notification. Affects presentation styling only,
/// never behavior or lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// One notification owned by the center for its lifetime.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

/// State transitions the presentation layer consumes.
///
/// A notification is `Posted` exactly once and then either `Dismissed`
/// or `Expired`, never both.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    Posted(Notification),
    Dismissed { id: NotificationId },
    Expired { id: NotificationId },
}

struct CenterState {
    active: Vec<Notification>,
    events: UnboundedSender<NotificationEvent>,
}

/// Accepts messages, tracks active notifications, and expires them.
///
/// Cheap to clone; clones share the same active set and event channel.
#[derive(Clone)]
pub struct NotificationCenter {
    state: Arc<Mutex<CenterState>>,
    next_id: Arc<AtomicU64>,
    default_ttl: Duration,
}

impl NotificationCenter {
    /// Create a center and the event stream its consumers read.
    pub fn new() -> (Self, UnboundedReceiver<NotificationEvent>) {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a center whose notifications default to `ttl`.
    pub fn with_ttl(ttl: Duration) -> (Self, UnboundedReceiver<NotificationEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let center = Self {
            state: Arc::new(Mutex::new(CenterState {
                active: Vec::new(),
                events,
            })),
            next_id: Arc::new(AtomicU64::new(1)),
            default_ttl: ttl,
        };
        (center, receiver)
    }

    /// Post a notification with the center's default TTL.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.notify_with_ttl(message, severity, self.default_ttl)
    }

    /// Post a notification that expires after `ttl` unless dismissed
    /// first. Each call creates an independent notification; existing
    /// ones are never replaced or merged.
    pub fn notify_with_ttl(
        &self,
        message: impl Into<String>,
        severity: Severity,
        ttl: Duration,
    ) -> NotificationId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
            ttl,
        };
        tracing::debug!(
            target: "notifications",
            "posting {:?} notification {}: {}",
            severity,
            id,
            notification.message
        );

        {
            let mut state = self.state.lock().unwrap();
            state.active.push(notification.clone());
            let _ = state.events.send(NotificationEvent::Posted(notification));
        }

        let center = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            center.expire(id);
        });

        id
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Warning)
    }

    pub fn danger(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Danger)
    }

    /// Remove a notification before its TTL runs out. Removing one
    /// that is already gone is a no-op.
    pub fn dismiss(&self, id: NotificationId) {
        self.remove(id, false);
    }

    /// Snapshot of the active notifications, in insertion order.
    pub fn active(&self) -> Vec<Notification> {
        self.state.lock().unwrap().active.clone()
    }

    fn expire(&self, id: NotificationId) {
        self.remove(id, true);
    }

    // Shared removal path for dismissal and expiry. The expiry timer
    // keeps running after a manual dismissal, so this must tolerate
    // the notification already being gone.
    fn remove(&self, id: NotificationId, expired: bool) {
        let mut state = self.state.lock().unwrap();
        let Some(pos) = state.active.iter().position(|n| n.id == id) else {
            return;
        };
        state.active.remove(pos);
        let event = if expired {
            NotificationEvent::Expired { id }
        } else {
            NotificationEvent::Dismissed { id }
        };
        let _ = state.events.send(event);
    }
}
