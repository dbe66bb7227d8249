//! One-shot deferred actions with cancel-before-reschedule semantics.

use std::time::Duration;

/// A single pending deadline.  Scheduling again replaces the previous one, so
/// at most one completion of a given kind is ever outstanding.
#[derive(Debug, Clone, Default)]
pub struct DeferredTimer {
    deadline: Option<Duration>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fire at `now + delay`, cancelling any pending one.
    /// Returns `true` when a pending deadline was replaced.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Returns `true` when something was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reschedule_replaces_previous() {
        let mut t = DeferredTimer::new();
        assert!(!t.schedule(ms(0), ms(220)));
        assert!(t.schedule(ms(100), ms(220)));
        assert!(!t.fire_if_due(ms(250)));
        assert!(t.fire_if_due(ms(320)));
        assert!(!t.fire_if_due(ms(400)));
    }

    #[test]
    fn test_cancel() {
        let mut t = DeferredTimer::new();
        t.schedule(ms(0), ms(10));
        assert!(t.cancel());
        assert!(!t.cancel());
        assert!(!t.fire_if_due(ms(50)));
    }

    #[test]
    fn test_zero_delay_fires_at_same_instant() {
        let mut t = DeferredTimer::new();
        t.schedule(ms(42), Duration::ZERO);
        assert!(t.fire_if_due(ms(42)));
    }
}
