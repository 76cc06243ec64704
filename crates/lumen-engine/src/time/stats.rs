use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Rolling window of recent frame times.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<Duration>,
    capacity: usize,
}

/// Average and tail latencies over the current window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSummary {
    pub average: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl FrameStats {
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records one frame; the oldest sample falls out once the window is full.
    pub fn push(&mut self, dt: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: Duration = self.samples.iter().sum();
        Some(total / self.samples.len() as u32)
    }

    /// Nearest-rank percentile, `p` in [0, 1].
    pub fn percentile(&self, p: f32) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted: Vec<Duration> = self.samples.iter().copied().collect();
        sorted.sort_unstable();
        let idx = (sorted.len() as f32 * p.clamp(0.0, 1.0)) as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied()
    }

    pub fn summary(&self) -> Option<FrameSummary> {
        Some(FrameSummary {
            average: self.average()?,
            p95: self.percentile(0.95)?,
            p99: self.percentile(0.99)?,
        })
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {:.2} ms (p95 {:.2} ms, p99 {:.2} ms)",
            millis(self.average),
            millis(self.p95),
            millis(self.p99)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_window_has_no_summary() {
        let stats = FrameStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.summary(), None);
    }

    #[test]
    fn average_and_percentiles() {
        let mut stats = FrameStats::new();
        for n in [7, 3, 10, 1, 5, 9, 2, 8, 4, 6] {
            stats.push(ms(n));
        }
        assert_eq!(stats.percentile(0.5), Some(ms(6)));
        let s = stats.summary().unwrap();
        assert_eq!(s.average, Duration::from_micros(5_500));
        assert_eq!(s.p95, ms(10));
        assert_eq!(s.p99, ms(10));
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let mut stats = FrameStats::new();
        stats.push(ms(16));
        assert_eq!(stats.percentile(0.0), Some(ms(16)));
        assert_eq!(stats.percentile(0.99), Some(ms(16)));
        assert_eq!(stats.percentile(1.0), Some(ms(16)));
    }

    #[test]
    fn window_drops_oldest() {
        let mut stats = FrameStats::with_capacity(3);
        for n in [100, 1, 2, 3] {
            stats.push(ms(n));
        }
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.average(), Some(ms(2)));
    }

    #[test]
    fn summary_formats_in_milliseconds() {
        let s = FrameSummary {
            average: ms(16),
            p95: ms(20),
            p99: Duration::from_micros(33_330),
        };
        assert_eq!(s.to_string(), "frame 16.00 ms (p95 20.00 ms, p99 33.33 ms)");
    }
}
