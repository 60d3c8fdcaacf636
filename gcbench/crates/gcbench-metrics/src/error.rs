//! Error Module - Metrics Error Types
//!
//! Degenerate data never produces an error here: a metric with nothing to
//! reduce yields NaN and is skipped by reporting. Errors are reserved for
//! metric definitions that cannot be honoured.

use thiserror::Error;

/// Errors raised while building or configuring metrics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// Comparison operator other than `>`, `>=`, `<`, `<=`
    #[error("unknown comparison operator {0:?}")]
    UnknownComparison(String),

    /// Threshold that no finite value can be compared against
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
}

/// Result type alias for metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;
