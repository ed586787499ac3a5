//! Rate-control combinators for user-triggered events
//!
//! `debounce` collapses a burst of calls into one trailing invocation;
//! `throttle` admits at most one invocation per window, firing on the
//! leading edge. Each combinator call creates isolated timer state, so
//! wrapping the same function twice yields two uncoupled gates.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

/// A debounced wrapper around a callback.
///
/// Every `call` supersedes any invocation still waiting to fire and
/// schedules a new one for `wait` after itself. The callback therefore
/// runs at most once per burst of calls spaced closer than `wait`,
/// with the value of the most recent call.
pub struct Debouncer<T> {
    wait: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

/// Wrap `callback` so it only fires after `wait` of quiescence.
///
/// Must be called from within a tokio runtime; the trailing fire runs
/// on a spawned task. Nothing is returned to the call site when the
/// callback eventually runs.
pub fn debounce<T, F>(callback: F, wait: Duration) -> Debouncer<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debouncer {
        wait,
        callback: Arc::new(callback),
        pending: Arc::new(Mutex::new(None)),
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Register a call, replacing any invocation not yet fired.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            // Superseded before firing; aborting an already-finished
            // task is a no-op.
            handle.abort();
        }

        let callback = Arc::clone(&self.callback);
        let wait = self.wait;
        tracing::trace!(target: "rate_control", "debounce fire scheduled in {:?}", wait);
        *pending = Some(tokio::spawn(async move {
            sleep(wait).await;
            callback(value);
        }));
    }

    /// Whether a fire is currently scheduled and has not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

/// A throttled wrapper around a callback.
///
/// The first call while idle invokes the callback immediately and opens
/// a window of `limit`; calls landing inside an open window are dropped
/// outright, never queued or deferred.
pub struct Throttler<T> {
    limit: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    window_closes: Arc<Mutex<Option<Instant>>>,
}

/// Wrap `callback` so it fires at most once per `limit`, leading-edge.
pub fn throttle<T, F>(callback: F, limit: Duration) -> Throttler<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Throttler {
        limit,
        callback: Arc::new(callback),
        window_closes: Arc::new(Mutex::new(None)),
    }
}

impl<T> Throttler<T> {
    /// Register a call; fires synchronously if no window is open,
    /// otherwise the call is dropped.
    pub fn call(&self, value: T) {
        let mut window = self.window_closes.lock().unwrap();
        let now = Instant::now();
        if let Some(closes) = *window {
            if now < closes {
                tracing::trace!(target: "rate_control", "throttled call dropped");
                return;
            }
        }
        *window = Some(now + self.limit);
        // Invoke outside the lock so a callback that re-enters this
        // throttler cannot deadlock.
        drop(window);
        (self.callback)(value);
    }

    /// Whether a window is currently open (further calls would drop).
    pub fn is_window_open(&self) -> bool {
        let window = self.window_closes.lock().unwrap();
        window.map_or(false, |closes| Instant::now() < closes)
    }
}
