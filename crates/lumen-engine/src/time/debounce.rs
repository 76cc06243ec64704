use std::time::Duration;

/// Holds the latest value of a bursty event until no new value arrived for
/// `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    elapsed: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Replaces the pending value and restarts the wait.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.elapsed = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.pending.is_some() {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the settled value once `delay` has passed since the last push.
    pub fn take(&mut self) -> Option<T> {
        if self.elapsed < self.delay {
            return None;
        }
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn nothing_before_delay() {
        let mut d = Debouncer::new(DELAY);
        d.push(1);
        d.tick(Duration::from_millis(99));
        assert_eq!(d.take(), None);
        assert!(d.is_pending());
    }

    #[test]
    fn latest_value_after_delay() {
        let mut d = Debouncer::new(DELAY);
        d.push(1);
        d.tick(Duration::from_millis(60));
        d.push(2);
        d.tick(Duration::from_millis(60));
        assert_eq!(d.take(), None);
        d.tick(Duration::from_millis(40));
        assert_eq!(d.take(), Some(2));
        assert_eq!(d.take(), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn idle_time_does_not_count() {
        let mut d = Debouncer::new(DELAY);
        d.tick(Duration::from_secs(1));
        d.push(7);
        assert_eq!(d.take(), None);
    }
}
