//! Error handling module for the gcbt CLI.
//!
//! Library errors are wrapped as they are, so the message printed on exit
//! is the one the failing layer produced.

use gcbench_metrics::MetricsError;
use gcbench_trace::TraceError;
use thiserror::Error;

/// Main error type for the gcbt CLI application.
#[derive(Error, Debug)]
pub enum GcbtError {
    /// Configuration file missing, unreadable or rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line input that cannot be acted on.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that is not a well-formed gctrace.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Metric definitions that cannot be honoured.
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// Result type alias using GcbtError.
pub type Result<T> = std::result::Result<T, GcbtError>;
