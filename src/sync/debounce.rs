//! Debounce timer utility
//!
//! A `Debouncer` collapses a burst of trigger events into one effective
//! action after a quiet period. Each trigger cancels and replaces the pending
//! deadline, so the action fires only once the source has been quiet for the
//! full window.
//!
//! Timers here are polled `Instant` deadlines rather than callbacks: the
//! owner calls `poll(now)` from its tick pump and acts when it returns true.
//! Tests drive time by passing synthetic instants.

use std::time::{Duration, Instant};

/// A single-deadline debounce timer.
///
/// Every event source gets its own `Debouncer`; windows are never shared.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet-period window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The configured quiet-period window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register an event: schedules (or reschedules) the deadline one full
    /// window after `now`. A pending deadline is always replaced.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the quiet period has elapsed.
    ///
    /// Returns true at most once per trigger burst; the deadline is consumed
    /// when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(100));

        debounce.trigger(t0);
        assert!(!debounce.poll(t0 + ms(50)));
        assert!(debounce.poll(t0 + ms(100)));
    }

    #[test]
    fn test_fires_only_once_per_burst() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(100));

        debounce.trigger(t0);
        assert!(debounce.poll(t0 + ms(150)));
        assert!(!debounce.poll(t0 + ms(300)));
    }

    #[test]
    fn test_retrigger_replaces_deadline() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(100));

        debounce.trigger(t0);
        debounce.trigger(t0 + ms(80));

        // The first deadline was cancelled by the second trigger
        assert!(!debounce.poll(t0 + ms(120)));
        assert!(debounce.poll(t0 + ms(180)));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(100));

        debounce.trigger(t0);
        assert!(debounce.is_pending());
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.poll(t0 + ms(500)));
    }

    #[test]
    fn test_poll_without_trigger_is_inert() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(100));
        assert!(!debounce.poll(t0 + ms(1000)));
    }
}
