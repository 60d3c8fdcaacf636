//! LatencyDist - Lock-Free Logarithmic Latency Histogram
//!
//! 256 buckets cover 1ns up to 1s on a log scale:
//!
//! ```text
//! bucket(t) = floor(256 * ln(t) / ln(1s)),  clamped to [0, 255]
//! ```
//!
//! so every bucket spans the same ratio (about 8.4%) of its lower bound.
//! Recording is three atomic updates and never blocks, so producers on the
//! measured hot path are not serialized by the histogram itself.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Number of buckets
pub const BUCKETS: usize = 256;

/// Upper end of the bucketed range; larger samples land in the last bucket
pub const CEILING: Duration = Duration::from_secs(1);

/// Distribution of latencies in logarithmic buckets
///
/// Shared by reference (or `Arc`) between any number of producers calling
/// [`add`](LatencyDist::add) and a reader taking a
/// [`snapshot`](LatencyDist::snapshot).
#[derive(Debug)]
pub struct LatencyDist {
    /// Total samples
    count: AtomicU64,

    /// Largest sample in nanoseconds
    max: AtomicU64,

    /// Samples per bucket
    buckets: [AtomicU64; BUCKETS],
}

impl LatencyDist {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            max: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Record one sample
    pub fn add(&self, t: Duration) {
        let ns = u64::try_from(t.as_nanos()).unwrap_or(u64::MAX);

        self.count.fetch_add(1, Ordering::Relaxed);

        let mut current_max = self.max.load(Ordering::Relaxed);
        while ns > current_max {
            match self.max.compare_exchange_weak(
                current_max,
                ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current_max = actual,
            }
        }

        self.buckets[Self::to_bucket(t)].fetch_add(1, Ordering::Relaxed);
    }

    /// Bucket index of a duration
    ///
    /// Durations under 1ns map to bucket 0, durations of 1s and up to the
    /// last bucket.
    pub fn to_bucket(t: Duration) -> usize {
        let ns = t.as_nanos();
        if ns < 1 {
            return 0;
        }
        raw_bucket(ns as f64).clamp(0, BUCKETS as i64 - 1) as usize
    }

    /// Half-open range `[lo, hi)` of durations that map to bucket `b`
    ///
    /// Bounds are the nanosecond-granular versions of
    /// `[1s^(b/256), 1s^((b+1)/256))`: every whole number of nanoseconds
    /// below 1s lies in the range of exactly its own bucket. Low buckets
    /// narrower than 1ns are empty (`lo == hi`).
    ///
    /// # Panics
    ///
    /// Panics if `b >= BUCKETS`.
    pub fn from_bucket(b: usize) -> (Duration, Duration) {
        assert!(b < BUCKETS, "bucket {} out of range", b);
        let lo = if b == 0 { 0 } else { lower_bound(b) };
        let hi = if b + 1 == BUCKETS {
            CEILING.as_nanos() as u64
        } else {
            lower_bound(b + 1)
        };
        (Duration::from_nanos(lo), Duration::from_nanos(hi))
    }

    /// Samples recorded so far
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Largest sample recorded so far
    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.max.load(Ordering::Relaxed))
    }

    /// Approximate `q` quantile, see [`Snapshot::quantile`]
    pub fn quantile(&self, q: f64) -> Duration {
        self.snapshot().quantile(q)
    }

    /// Copy the current counts
    ///
    /// Each value is read atomically but the copy as a whole is not: a
    /// snapshot taken while producers are still running may miss their
    /// latest samples.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            count: self.count.load(Ordering::Relaxed),
            max: self.max(),
            buckets: std::array::from_fn(|b| self.buckets[b].load(Ordering::Relaxed)),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        debug!("resetting latency distribution after {} samples", self.count());
        self.count.store(0, Ordering::Relaxed);
        self.max.store(0, Ordering::Relaxed);
        for bucket in &self.buckets {
            bucket.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for LatencyDist {
    fn default() -> Self {
        Self::new()
    }
}

/// Unclamped `floor(256 * ln(ns) / ln(1s))`
fn raw_bucket(ns: f64) -> i64 {
    let ceiling = CEILING.as_nanos() as f64;
    (BUCKETS as f64 * ns.ln() / ceiling.ln()).floor() as i64
}

/// Smallest whole nanosecond count whose raw bucket is at least `b`
///
/// Starts from the analytic bound and corrects it against `raw_bucket`, so
/// the two directions of the mapping agree even where floating point
/// rounding would place them one nanosecond apart.
fn lower_bound(b: usize) -> u64 {
    let b = b as i64;
    let ceiling = CEILING.as_nanos() as f64;
    let mut t = (ceiling.ln() * b as f64 / BUCKETS as f64).exp().ceil() as u64;
    while t > 1 && raw_bucket((t - 1) as f64) >= b {
        t -= 1;
    }
    while raw_bucket(t.max(1) as f64) < b {
        t += 1;
    }
    t
}

/// Point-in-time copy of a [`LatencyDist`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Value of the sample counter when copied
    pub count: u64,

    /// Largest sample when copied
    pub max: Duration,

    /// Samples per bucket
    pub buckets: [u64; BUCKETS],
}

impl Snapshot {
    /// Samples across all buckets
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// Non-empty buckets with their counts, in index order
    pub fn nonempty(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.buckets
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
    }

    /// Approximate `q` quantile
    ///
    /// Finds the bucket holding rank `round(q * (N + 1))`, clamped to
    /// `[0, N - 1]`, and returns the midpoint of that bucket's range,
    /// capped at the observed maximum. Returns zero when empty.
    pub fn quantile(&self, q: f64) -> Duration {
        let total = self.total();
        if total == 0 {
            return Duration::ZERO;
        }

        let rank = (q * (total + 1) as f64).round();
        let mut n = if rank.is_nan() || rank < 0.0 {
            0
        } else {
            (rank as u64).min(total - 1)
        };

        let mut b = 0;
        while b + 1 < BUCKETS && n >= self.buckets[b] {
            n -= self.buckets[b];
            b += 1;
        }

        let (lo, hi) = LatencyDist::from_bucket(b);
        ((lo + hi) / 2).min(self.max)
    }
}
