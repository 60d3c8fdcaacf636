//! # gcbench-metrics - Collector Health Metrics
//!
//! Reduces a parsed trace to a handful of numbers that say whether the
//! collector behaved: how often it ran, how long its pauses were, how fast
//! it marked, how well it hit its heap goal and how much CPU it took.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcbench_metrics::{MetricConfig, MetricsEngine, RunInfo};
//! use gcbench_trace::parse_trace;
//! use std::time::Duration;
//!
//! let output = "\
//! gc 1 @0.100s 0%: 0.011+0.39+0.0061 ms clock, 0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P
//! gc 2 @0.600s 0%: 0.020+0.45+0.0070 ms clock, 0.020+0.12/0.30/0+0.0070 ms cpu, 4->5->3 MB, 5 MB goal, 4 P
//! ";
//!
//! let run = RunInfo::with_elapsed(parse_trace(output)?, Duration::from_millis(1100));
//! let report = MetricsEngine::standard(&MetricConfig::default()).evaluate(&run);
//!
//! assert_eq!(report.get("GCs/sec"), Some(2.0));
//! println!("{}", report.format_line("\t"));
//! # Ok::<(), gcbench_trace::TraceError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extra;
pub mod format;
pub mod metric;
pub mod reduce;
pub mod report;
pub mod run;
pub mod stats;

pub use config::MetricConfig;
pub use engine::MetricsEngine;
pub use error::{MetricsError, Result};
pub use extra::{
    benchmark_name, format_extra_metric, latency_extras, parse_extra_metrics, passthrough_lines,
};
pub use format::{alignment, sigfigs};
pub use metric::{Check, Comparison, Metric, Warning};
pub use report::Report;
pub use run::RunInfo;
pub use stats::{pctile, sum};
