//! Configuration Module - Metric Thresholds
//!
//! Every cutoff the standard metric set applies lives here, so a run can be
//! judged against stricter or looser limits without code changes.

use crate::error::{MetricsError, Result};
use gcbench_trace::MB;
use serde::{Deserialize, Serialize};

/// Thresholds and sample filters for [`MetricsEngine::standard`]
///
/// # Examples
///
/// ```rust
/// use gcbench_metrics::MetricConfig;
///
/// // Stricter pause budget, no collection-rate warning
/// let config = MetricConfig {
///     stw_warn_ns: 1e6,
///     gc_rate_warn: None,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// [`MetricsEngine::standard`]: crate::MetricsEngine::standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Warn when the 95th percentile sweep or mark termination pause is at
    /// least this many nanoseconds
    ///
    /// Default: 5e6 (5ms)
    pub stw_warn_ns: f64,

    /// Cycles whose heap goal is below this many bytes are left out of the
    /// overshoot distribution
    ///
    /// Default: 10 MiB
    pub heap_overshoot_floor: u64,

    /// Warn when the 95th percentile overshoot exceeds this fraction
    ///
    /// Default: 0.0
    pub overshoot_high_warn: f64,

    /// Warn when the 5th percentile overshoot is below this fraction
    ///
    /// Default: -0.2
    pub overshoot_low_warn: f64,

    /// Warn when the 95th percentile mark-phase CPU utilization exceeds this
    ///
    /// Default: 0.3
    pub cpu_util_warn: f64,

    /// Warn when at least this many collections happen per second;
    /// `None` disables the check and is written as `false` in files
    ///
    /// Default: 5.0
    #[serde(with = "optional_threshold")]
    pub gc_rate_warn: Option<f64>,

    /// Leave five-phase cycles out of the CPU utilization distribution
    ///
    /// Default: true
    pub cpu_util_skip_five_phase: bool,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            stw_warn_ns: 5e6,
            heap_overshoot_floor: 10 * MB,
            overshoot_high_warn: 0.0,
            overshoot_low_warn: -0.2,
            cpu_util_warn: 0.3,
            gc_rate_warn: Some(5.0),
            cpu_util_skip_five_phase: true,
        }
    }
}

impl MetricConfig {
    /// Reject thresholds no value can be meaningfully compared against
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("stw_warn_ns", self.stw_warn_ns),
            ("overshoot_high_warn", self.overshoot_high_warn),
            ("overshoot_low_warn", self.overshoot_low_warn),
            ("cpu_util_warn", self.cpu_util_warn),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(MetricsError::InvalidThreshold(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if let Some(rate) = self.gc_rate_warn {
            if !rate.is_finite() {
                return Err(MetricsError::InvalidThreshold(format!(
                    "gc_rate_warn must be finite, got {}",
                    rate
                )));
            }
        }

        if self.overshoot_low_warn > self.overshoot_high_warn {
            return Err(MetricsError::InvalidThreshold(
                "overshoot_low_warn cannot exceed overshoot_high_warn".to_string(),
            ));
        }

        Ok(())
    }
}

/// A threshold that can be switched off with `false`
mod optional_threshold {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(f64),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_f64(*v),
            None => s.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Value(v) => Ok(Some(v)),
            Raw::Flag(false) => Ok(None),
            Raw::Flag(true) => Err(D::Error::custom("expected a threshold or false")),
        }
    }
}
