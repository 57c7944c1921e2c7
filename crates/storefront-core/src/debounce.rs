//! Search input debouncing.
//!
//! The clock is passed in, so the debouncer stays deterministic and the
//! caller decides how to schedule `poll`.

use std::time::{Duration, Instant};

use tracing::trace;

/// Debounces search-box input before it becomes a filter change.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_dispatched: String,
}

impl SearchDebouncer {
    /// Create a debouncer. `current` is the search already applied.
    pub fn new(delay: Duration, current: impl Into<String>) -> Self {
        Self {
            delay,
            pending: None,
            last_dispatched: current.into().trim().to_string(),
        }
    }

    /// Record a keystroke, superseding any pending dispatch.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// Whether a dispatch is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Yield the search to dispatch once the deadline has passed.
    ///
    /// Returns `None` while waiting, or when the trimmed text matches what
    /// was dispatched last.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.flush(),
            _ => None,
        }
    }

    /// Dispatch the pending text right away.
    pub fn flush(&mut self) -> Option<String> {
        let (text, _) = self.pending.take()?;
        let text = text.trim().to_string();
        if text == self.last_dispatched {
            trace!(search = %text, "search unchanged, skipping dispatch");
            return None;
        }
        self.last_dispatched.clone_from(&text);
        Some(text)
    }

    /// Drop the pending dispatch.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forget the last dispatched value, e.g. after filters were reset
    /// elsewhere.
    pub fn sync(&mut self, current: &str) {
        self.pending = None;
        self.last_dispatched = current.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_waits_for_deadline() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY, "");
        debouncer.input("iph", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(250)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY), Some("iph".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_new_input_supersedes_pending() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY, "");
        debouncer.input("iph", start);
        debouncer.input("ipad", start + Duration::from_millis(300));

        assert_eq!(debouncer.poll(start + DELAY), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(800)),
            Some("ipad".to_string())
        );
    }

    #[test]
    fn test_unchanged_text_is_not_dispatched() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY, "ipad");
        debouncer.input(" ipad ", start);
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_cancel_and_sync() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY, "ipad");
        debouncer.input("", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + DELAY), None);

        debouncer.sync("");
        debouncer.input("ipad", start);
        assert_eq!(debouncer.flush(), Some("ipad".to_string()));
    }
}
