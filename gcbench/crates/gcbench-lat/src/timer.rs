//! Latency Timers - Feeding a Distribution from Live Code
//!
//! Two ways to produce samples:
//!
//! - [`LatencyTracker`] measures the gap between consecutive
//!   [`tick`](LatencyTracker::tick) calls, one per completed operation.
//! - [`ScopedSample`] measures its own lifetime and records it on drop.

use crate::dist::LatencyDist;
use std::time::{Duration, Instant};

impl LatencyDist {
    /// Start a tracker that records the time between ticks
    pub fn tracker(&self) -> LatencyTracker<'_> {
        LatencyTracker::new(self)
    }

    /// Start a guard that records its lifetime when dropped
    pub fn scoped(&self) -> ScopedSample<'_> {
        ScopedSample::new(self)
    }
}

/// Records the interval since the previous tick
///
/// Each producer thread owns its tracker; the distribution behind it is
/// shared.
#[derive(Debug)]
pub struct LatencyTracker<'a> {
    dist: &'a LatencyDist,
    last: Instant,
}

impl<'a> LatencyTracker<'a> {
    pub fn new(dist: &'a LatencyDist) -> Self {
        Self {
            dist,
            last: Instant::now(),
        }
    }

    /// Record the time since the last tick (or since creation) and restart
    /// the interval
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.dist.add(elapsed);
        self.last = now;
        elapsed
    }

    /// Time since the last tick, without recording anything
    pub fn elapsed(&self) -> Duration {
        self.last.elapsed()
    }
}

/// Guard recording the time from creation to drop
#[derive(Debug)]
pub struct ScopedSample<'a> {
    dist: &'a LatencyDist,
    start: Instant,
}

impl<'a> ScopedSample<'a> {
    pub fn new(dist: &'a LatencyDist) -> Self {
        Self {
            dist,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedSample<'_> {
    fn drop(&mut self) {
        self.dist.add(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_tick_records_each_interval() {
        let dist = LatencyDist::new();
        let mut tracker = dist.tracker();

        thread::sleep(Duration::from_millis(2));
        let first = tracker.tick();
        let second = tracker.tick();

        assert_eq!(dist.count(), 2);
        assert!(first >= Duration::from_millis(2));
        assert!(second < first);
        assert_eq!(dist.max(), first);
    }

    #[test]
    fn test_scoped_sample_records_on_drop() {
        let dist = LatencyDist::new();
        {
            let _sample = dist.scoped();
            assert_eq!(dist.count(), 0);
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(dist.count(), 1);
        assert!(dist.max() >= Duration::from_millis(1));
    }
}
