//! Debounced search trigger
//!
//! Thin composition of the rate controller and a search callback:
//! qualifying input schedules the callback with the current query,
//! bursts of keystrokes collapse into one trailing fire.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::rate_control::{debounce, Debouncer};

/// Quiescence window between the last keystroke and the search firing.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this never trigger a search.
pub const MIN_QUERY_LEN: usize = 2;

pub struct SearchTrigger {
    debouncer: Debouncer<String>,
    min_query_len: usize,
}

impl SearchTrigger {
    /// Wire `callback` to fire with the current query after the
    /// standard 300 ms of input quiescence.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self::with_settings(SEARCH_DEBOUNCE, MIN_QUERY_LEN, callback)
    }

    pub fn with_settings<F>(wait: Duration, min_query_len: usize, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self {
            debouncer: debounce(callback, wait),
            min_query_len,
        }
    }

    pub fn from_config<F>(config: &SearchConfig, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self::with_settings(
            Duration::from_millis(config.debounce_ms),
            config.min_query_len,
            callback,
        )
    }

    /// Feed the current value of the search input.
    ///
    /// The value is trimmed; if it is long enough, the debounced
    /// callback is (re)scheduled with it. Shorter input neither
    /// schedules nor cancels, so a fire scheduled for an earlier,
    /// longer query can still go off if nothing further qualifies
    /// within the window.
    pub fn input_changed(&self, raw: &str) {
        let query = raw.trim();
        if query.chars().count() < self.min_query_len {
            return;
        }
        self.debouncer.call(query.to_string());
    }

    /// Whether a search is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
