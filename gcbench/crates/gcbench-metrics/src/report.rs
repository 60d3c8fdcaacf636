//! Report - Evaluated Metrics of One Run
//!
//! The text form is a single line: the iteration count, then one
//! `<align><value> <label>` entry per defined metric and per extra metric.
//! Warnings are written separately, one per line.

use crate::format::sigfigs;
use crate::metric::Warning;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::{self, Write};

/// Metric values and warnings for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Benchmark name the run is reported under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub iterations: u64,

    /// Cycles in the trace, forced ones included
    pub cycles: usize,

    pub forced: usize,

    /// Standard metrics in definition order; NaN marks an undefined value
    pub metrics: IndexMap<String, f64>,

    /// Workload-reported metrics, sorted by name
    pub extras: IndexMap<String, f64>,

    pub warnings: Vec<Warning>,
}

impl Report {
    /// Set the benchmark name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append extra metrics; a name already present is overwritten
    pub fn with_extras(mut self, extras: IndexMap<String, f64>) -> Self {
        self.extras.extend(extras);
        self
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.metrics
            .get(label)
            .or_else(|| self.extras.get(label))
            .copied()
    }

    /// Metrics and extras with a defined value, in print order
    pub fn defined(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metrics
            .iter()
            .chain(self.extras.iter())
            .filter(|(_, v)| !v.is_nan())
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// The report line, without a trailing newline
    pub fn format_line(&self, align: &str) -> String {
        let mut line = String::new();
        if let Some(name) = &self.name {
            line.push_str(name);
            line.push('\t');
        }
        line.push_str(&self.iterations.to_string());
        for (label, value) in self.defined() {
            line.push_str(&format!("{}{:>10} {}", align, sigfigs(value), label));
        }
        line
    }

    /// Write the report line to `out` and the warnings to `err`
    pub fn write_to<O, E>(&self, out: &mut O, err: &mut E, align: &str) -> io::Result<()>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        writeln!(out, "{}", self.format_line(align))?;
        for warning in &self.warnings {
            writeln!(err, "{}", warning)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Comparison;

    fn report() -> Report {
        let mut metrics = IndexMap::new();
        metrics.insert("GCs/sec".to_string(), 2.5);
        metrics.insert("95%ile-CPU-util".to_string(), f64::NAN);
        metrics.insert("95%ile-heap-overshoot".to_string(), 0.125);
        Report {
            name: None,
            iterations: 1,
            cycles: 4,
            forced: 1,
            metrics,
            extras: IndexMap::new(),
            warnings: vec![Warning {
                label: "95%ile-heap-overshoot".to_string(),
                value: 0.125,
                cmp: Comparison::Gt,
                threshold: 0.0,
            }],
        }
    }

    #[test]
    fn test_line_skips_undefined() {
        let line = report().format_line("\t");
        assert_eq!(line, "1\t      2.50 GCs/sec\t     0.125 95%ile-heap-overshoot");
    }

    #[test]
    fn test_extras_follow_metrics() {
        let mut extras = IndexMap::new();
        extras.insert("reqs/sec".to_string(), 1000.0);
        let report = report().named("BenchmarkRPC").with_extras(extras);

        let line = report.format_line("\t");
        assert!(line.starts_with("BenchmarkRPC\t1\t"));
        assert!(line.ends_with("\t      1000 reqs/sec"));
        assert_eq!(report.get("reqs/sec"), Some(1000.0));
        assert_eq!(report.defined().count(), 3);
    }

    #[test]
    fn test_write_splits_streams() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        report().write_to(&mut out, &mut err, "\t").unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert_eq!(err, "Warning: 0.125 95%ile-heap-overshoot > 0\n");
    }

    #[test]
    fn test_json_marks_undefined_as_null() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["GCs/sec"], 2.5);
        assert!(value["metrics"]["95%ile-CPU-util"].is_null());
        assert_eq!(value["warnings"][0]["cmp"], ">");
        assert!(value.get("name").is_none());
    }
}
