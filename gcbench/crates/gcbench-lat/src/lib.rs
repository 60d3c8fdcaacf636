//! # gcbench-lat - Latency Distributions
//!
//! A constant-memory histogram of operation latencies that any number of
//! threads can record into at once, with quantile queries and terminal
//! rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcbench_lat::LatencyDist;
//! use std::time::Duration;
//!
//! let dist = LatencyDist::new();
//! dist.add(Duration::from_micros(40));
//! dist.add(Duration::from_micros(45));
//! dist.add(Duration::from_millis(3));
//!
//! assert_eq!(dist.count(), 3);
//! assert_eq!(dist.max(), Duration::from_millis(3));
//! assert!(dist.quantile(0.5) < Duration::from_micros(50));
//!
//! print!("{}", dist.hist(70, 5));
//! ```
//!
//! Producers on the measured path usually hold a [`LatencyTracker`] and call
//! [`tick`](LatencyTracker::tick) once per completed operation.

pub mod dist;
pub mod format;
pub mod render;
pub mod timer;

pub use dist::{LatencyDist, Snapshot, BUCKETS, CEILING};
pub use format::FmtDuration;
pub use timer::{LatencyTracker, ScopedSample};
