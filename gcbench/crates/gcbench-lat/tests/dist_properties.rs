//! LatencyDist Property Tests
//!
//! Bucket mapping, quantile ordering and concurrent recording.

use gcbench_lat::{LatencyDist, BUCKETS, CEILING};
use proptest::prelude::*;
use std::time::Duration;

const CEILING_NS: u64 = 1_000_000_000;

// ============================================================================
// BUCKET MAPPING
// ============================================================================

proptest! {
    #[test]
    fn bucket_range_contains_sample(ns in 1u64..CEILING_NS) {
        let t = Duration::from_nanos(ns);
        let b = LatencyDist::to_bucket(t);
        prop_assert!(b < BUCKETS);

        let (lo, hi) = LatencyDist::from_bucket(b);
        prop_assert!(lo <= t, "{:?} below bucket {} [{:?}, {:?})", t, b, lo, hi);
        prop_assert!(t < hi, "{:?} above bucket {} [{:?}, {:?})", t, b, lo, hi);
    }

    #[test]
    fn bucket_is_monotonic(a in 0u64..2 * CEILING_NS, b in 0u64..2 * CEILING_NS) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            LatencyDist::to_bucket(Duration::from_nanos(small))
                <= LatencyDist::to_bucket(Duration::from_nanos(large))
        );
    }

    #[test]
    fn quantiles_are_ordered(samples in prop::collection::vec(0u64..2 * CEILING_NS, 1..200)) {
        let dist = LatencyDist::new();
        for &ns in &samples {
            dist.add(Duration::from_nanos(ns));
        }

        let q0 = dist.quantile(0.0);
        let q50 = dist.quantile(0.5);
        let q100 = dist.quantile(1.0);
        prop_assert!(q0 <= q50);
        prop_assert!(q50 <= q100);
        prop_assert!(q100 <= dist.max());
        prop_assert_eq!(dist.max(), Duration::from_nanos(*samples.iter().max().unwrap()));
    }
}

#[test]
fn test_over_ceiling_is_last_bucket() {
    let dist = LatencyDist::new();
    dist.add(Duration::from_secs(3));

    let snap = dist.snapshot();
    assert_eq!(snap.buckets[BUCKETS - 1], 1);
    assert_eq!(dist.max(), Duration::from_secs(3));
    // Midpoint of the last bucket, still below the observed max
    assert!(dist.quantile(0.5) < CEILING);
}

#[test]
fn test_one_millisecond_sample() {
    let dist = LatencyDist::new();
    let t = Duration::from_millis(1);
    dist.add(t);

    let (lo, hi) = LatencyDist::from_bucket(LatencyDist::to_bucket(t));
    let median = dist.quantile(0.5);
    assert!(lo <= median && median < hi);
    assert_eq!(dist.max(), t);
}

// ============================================================================
// CONCURRENT RECORDING
// ============================================================================

/// Every add from every producer is counted, and max is the global max
#[test]
fn test_concurrent_adds_are_not_lost() {
    let dist = LatencyDist::new();
    let producers = 8u64;
    let per_producer = 10_000u64;

    crossbeam::scope(|s| {
        for p in 0..producers {
            let dist = &dist;
            s.spawn(move |_| {
                for i in 0..per_producer {
                    dist.add(Duration::from_nanos(1 + p * per_producer + i));
                }
            });
        }
    })
    .unwrap();

    let snap = dist.snapshot();
    assert_eq!(dist.count(), producers * per_producer);
    assert_eq!(snap.total(), producers * per_producer);
    assert_eq!(dist.max(), Duration::from_nanos(producers * per_producer));
}

/// Trackers on several threads share one distribution
#[test]
fn test_concurrent_trackers() {
    let dist = LatencyDist::new();

    crossbeam::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                let mut tracker = dist.tracker();
                for _ in 0..100 {
                    tracker.tick();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(dist.count(), 400);
}

/// Reading while producers run never panics and never overshoots the end state
#[test]
fn test_snapshot_during_writes() {
    let dist = LatencyDist::new();

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for i in 0..50_000u64 {
                dist.add(Duration::from_nanos(i % 5_000 + 1));
            }
        });
        s.spawn(|_| {
            for _ in 0..100 {
                let snap = dist.snapshot();
                assert!(snap.total() <= 50_000);
                let _ = snap.quantile(0.99);
                let _ = snap.hist(40, 3);
            }
        });
    })
    .unwrap();

    assert_eq!(dist.count(), 50_000);
}
