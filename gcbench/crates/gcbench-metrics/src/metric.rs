//! Metric Definitions - Labelled Reductions with Optional Thresholds

use crate::error::MetricsError;
use crate::format::sigfigs;
use crate::run::RunInfo;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Comparison applied by a threshold check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Comparison {
    /// Whether `value <op> threshold` holds
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Gt => value > threshold,
            Comparison::Ge => value >= threshold,
            Comparison::Lt => value < threshold,
            Comparison::Le => value <= threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparison {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Comparison::Gt),
            ">=" => Ok(Comparison::Ge),
            "<" => Ok(Comparison::Lt),
            "<=" => Ok(Comparison::Le),
            other => Err(MetricsError::UnknownComparison(other.to_string())),
        }
    }
}

/// Threshold a metric value is compared against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Check {
    pub cmp: Comparison,
    pub threshold: f64,
}

impl Check {
    /// Warn when `value <cmp> threshold`
    pub fn warn_if(cmp: Comparison, threshold: f64) -> Self {
        Self { cmp, threshold }
    }

    /// Warning for `value` if the comparison holds
    pub fn evaluate(&self, label: &str, value: f64) -> Option<Warning> {
        if !self.cmp.holds(value, self.threshold) {
            return None;
        }
        Some(Warning {
            label: label.to_string(),
            value,
            cmp: self.cmp,
            threshold: self.threshold,
        })
    }
}

/// A threshold that a metric value crossed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub label: String,
    pub value: f64,
    pub cmp: Comparison,
    pub threshold: f64,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: {} {} {} {}",
            sigfigs(self.value),
            self.label,
            self.cmp,
            sigfigs(self.threshold)
        )
    }
}

type Reduce = Box<dyn Fn(&RunInfo) -> f64 + Send + Sync>;

/// A labelled reduction from a run to one number
///
/// The reduction must be pure: evaluating it twice over the same run gives
/// the same value.
pub struct Metric {
    label: String,
    reduce: Reduce,
    check: Option<Check>,
}

impl Metric {
    pub fn new<F>(label: impl Into<String>, reduce: F) -> Self
    where
        F: Fn(&RunInfo) -> f64 + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            reduce: Box::new(reduce),
            check: None,
        }
    }

    /// Attach a threshold check
    pub fn with_check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn check(&self) -> Option<&Check> {
        self.check.as_ref()
    }

    /// Reduce `run` to this metric's value; NaN when undefined
    pub fn compute(&self, run: &RunInfo) -> f64 {
        (self.reduce)(run)
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("label", &self.label)
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}
