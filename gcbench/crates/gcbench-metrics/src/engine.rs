//! MetricsEngine - Ordered Metric Evaluation
//!
//! The engine holds an ordered list of [`Metric`]s. Evaluating a run
//! computes every metric in order, drops the undefined (NaN) ones from
//! threshold checking, and collects the rest into a [`Report`].
//!
//! # Standard metrics
//!
//! | Label | Reduction | Default warning |
//! |---|---|---|
//! | `GCs/sec` | organic cycles per second | `>= 5` |
//! | `95%ile-ns/sweepTerm` | sweep termination pause | `>= 5e6` |
//! | `95%ile-ns/markTerm` | mark termination pause | `>= 5e6` |
//! | `MB-marked/CPU/sec` | mark throughput | none |
//! | `95%ile-heap-overshoot` | `actual / goal - 1` | `> 0` |
//! | `5%ile-heap-overshoot` | `actual / goal - 1` | `< -0.2` |
//! | `95%ile-CPU-util` | mark-phase CPU share | `> 0.3` |

use crate::config::MetricConfig;
use crate::metric::{Check, Comparison, Metric};
use crate::reduce;
use crate::report::Report;
use crate::run::RunInfo;
use crate::stats::pctile;
use indexmap::IndexMap;
use log::{debug, warn};

/// Evaluates an ordered set of metrics over runs
#[derive(Debug, Default)]
pub struct MetricsEngine {
    metrics: Vec<Metric>,
}

impl MetricsEngine {
    /// Engine with no metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard collector health metrics, with thresholds from `config`
    pub fn standard(config: &MetricConfig) -> Self {
        let floor = config.heap_overshoot_floor;
        let skip_five_phase = config.cpu_util_skip_five_phase;

        let mut rate = Metric::new("GCs/sec", reduce::gcs_per_sec);
        if let Some(limit) = config.gc_rate_warn {
            rate = rate.with_check(Check::warn_if(Comparison::Ge, limit));
        }

        Self::new()
            .with(rate)
            .with(
                Metric::new("95%ile-ns/sweepTerm", |run: &RunInfo| {
                    pctile(&reduce::sweep_term_ns(&run.trace), 0.95)
                })
                .with_check(Check::warn_if(Comparison::Ge, config.stw_warn_ns)),
            )
            .with(
                Metric::new("95%ile-ns/markTerm", |run: &RunInfo| {
                    pctile(&reduce::mark_term_ns(&run.trace), 0.95)
                })
                .with_check(Check::warn_if(Comparison::Ge, config.stw_warn_ns)),
            )
            .with(Metric::new("MB-marked/CPU/sec", |run: &RunInfo| {
                reduce::marked_mb_per_cpu_sec(&run.trace)
            }))
            .with(
                Metric::new("95%ile-heap-overshoot", move |run: &RunInfo| {
                    pctile(&reduce::heap_overshoot(&run.trace, floor), 0.95)
                })
                .with_check(Check::warn_if(Comparison::Gt, config.overshoot_high_warn)),
            )
            .with(
                Metric::new("5%ile-heap-overshoot", move |run: &RunInfo| {
                    pctile(&reduce::heap_overshoot(&run.trace, floor), 0.05)
                })
                .with_check(Check::warn_if(Comparison::Lt, config.overshoot_low_warn)),
            )
            .with(
                Metric::new("95%ile-CPU-util", move |run: &RunInfo| {
                    pctile(&reduce::cpu_util(&run.trace, skip_five_phase), 0.95)
                })
                .with_check(Check::warn_if(Comparison::Gt, config.cpu_util_warn)),
            )
    }

    /// Append a metric, builder style
    pub fn with(mut self, metric: Metric) -> Self {
        self.push(metric);
        self
    }

    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Compute every metric over `run`, in definition order
    pub fn evaluate(&self, run: &RunInfo) -> Report {
        let mut values = IndexMap::with_capacity(self.metrics.len());
        let mut warnings = Vec::new();

        for metric in &self.metrics {
            let value = metric.compute(run);
            values.insert(metric.label().to_string(), value);

            if value.is_nan() {
                continue;
            }
            let warning = metric
                .check()
                .and_then(|check| check.evaluate(metric.label(), value));
            if let Some(warning) = warning {
                warn!("{}", warning);
                warnings.push(warning);
            }
        }

        debug!(
            "evaluated {} metrics over {} cycles: {} undefined, {} warnings",
            values.len(),
            run.trace.len(),
            values.values().filter(|v: &&f64| v.is_nan()).count(),
            warnings.len()
        );

        Report {
            name: None,
            iterations: 1,
            cycles: run.trace.len(),
            forced: run.trace.forced_count(),
            metrics: values,
            extras: IndexMap::new(),
            warnings,
        }
    }
}
