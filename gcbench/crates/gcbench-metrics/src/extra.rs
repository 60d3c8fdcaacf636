//! Extra Metrics - Values Reported by the Workload Itself
//!
//! A workload can report numbers the trace does not contain by printing
//!
//! ```text
//! metric <value> <name>
//! ```
//!
//! lines into its output. They are collected here and appended to the
//! report after the standard metrics.

use gcbench_lat::LatencyDist;
use gcbench_trace::is_cycle_line;
use indexmap::IndexMap;
use log::trace;

const PREFIX: &str = "metric ";

/// Extra metrics in an output, sorted by name
///
/// Malformed `metric` lines are ignored. A name reported more than once
/// keeps its last value.
pub fn parse_extra_metrics(text: &str) -> IndexMap<String, f64> {
    let mut extras = IndexMap::new();
    for line in text.lines().filter(|l| l.starts_with(PREFIX)) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [_, value, name] = fields[..] else {
            trace!("ignoring malformed metric line: {}", line);
            continue;
        };
        match value.parse::<f64>() {
            Ok(value) => {
                extras.insert(name.to_string(), value);
            }
            Err(_) => trace!("ignoring metric with bad value: {}", line),
        }
    }
    extras.sort_keys();
    extras
}

/// The line a workload prints to report `value` under `name`
pub fn format_extra_metric(name: &str, value: f64) -> String {
    format!("{}{} {}", PREFIX, value, name)
}

/// Lines of an output that are neither cycle lines nor extra metrics
pub fn passthrough_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|l| !is_cycle_line(l) && !l.starts_with(PREFIX))
        .collect()
}

/// Summary of a latency distribution as extra metrics, in nanoseconds
pub fn latency_extras(dist: &LatencyDist) -> IndexMap<String, f64> {
    let snap = dist.snapshot();
    let mut extras = IndexMap::new();
    for (name, q) in [
        ("P50-latency-ns", 0.5),
        ("P99-latency-ns", 0.99),
        ("P99.9-latency-ns", 0.999),
    ] {
        extras.insert(name.to_string(), snap.quantile(q).as_nanos() as f64);
    }
    extras.insert("max-latency-ns".to_string(), snap.max.as_nanos() as f64);
    extras
}

/// Name a benchmark run the way result files expect
///
/// `Benchmark<name>` followed by `/<key>:<value>` per configuration entry
/// and the parallelism: `/gomaxprocs:<n>` when there are entries, `-<n>`
/// otherwise. Parallelism 1 is left off.
pub fn benchmark_name(name: &str, config: &[(&str, String)], procs: usize) -> String {
    let mut full = format!("Benchmark{}", name);
    if config.is_empty() {
        if procs != 1 {
            full.push_str(&format!("-{}", procs));
        }
        return full;
    }
    for (key, value) in config {
        full.push_str(&format!("/{}:{}", key, value));
    }
    if procs != 1 {
        full.push_str(&format!("/gomaxprocs:{}", procs));
    }
    full
}
