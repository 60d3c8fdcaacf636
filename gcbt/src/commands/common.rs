//! Common types and utilities for gcbt commands.
//!
//! Input loading and the duration syntax shared by the commands.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::error::{GcbtError, Result};

/// Path that stands for standard input.
pub const STDIN: &str = "-";

// ============================================================================
// Input
// ============================================================================

/// Read a whole input, from standard input when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIN) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        return Err(GcbtError::Validation(format!(
            "{} {}",
            error_messages::INPUT_PATH_NOT_EXIST,
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(GcbtError::Validation(format!(
            "{} {}",
            error_messages::INPUT_PATH_NOT_FILE,
            path.display()
        )));
    }

    Ok(std::fs::read_to_string(path)?)
}

// ============================================================================
// Duration Syntax
// ============================================================================

/// Units accepted after a sample value, longest suffix first.
const UNITS: [(&str, f64); 5] = [
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
];

/// Parse a latency sample: integer nanoseconds, or a number with a
/// `ns`, `us`, `µs`, `ms` or `s` suffix.
pub fn parse_sample(text: &str) -> Option<Duration> {
    let text = text.trim();
    if let Ok(ns) = text.parse::<u64>() {
        return Some(Duration::from_nanos(ns));
    }

    let (number, scale) = UNITS
        .iter()
        .find_map(|&(unit, scale)| text.strip_suffix(unit).map(|n| (n, scale)))?;
    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let ns = (value * scale).round();
    if ns > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(ns as u64))
}

/// Parse wall-clock seconds given on the command line.
pub fn parse_seconds(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        GcbtError::Validation(format!("{} {}", error_messages::INVALID_ELAPSED, secs))
    })
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message templates.
pub mod error_messages {
    /// Error when input path does not exist.
    pub const INPUT_PATH_NOT_EXIST: &str = "Input path does not exist:";

    /// Error when input path is not a file.
    pub const INPUT_PATH_NOT_FILE: &str = "Input path is not a file:";

    /// Error when a latency sample cannot be read.
    pub const INVALID_SAMPLE: &str = "Invalid latency sample";

    /// Error when the run length is negative, not a number or out of range.
    pub const INVALID_ELAPSED: &str = "Elapsed time must be a non-negative number of seconds, got";

    /// Error when a field name is not part of the cycle record.
    pub const UNKNOWN_FIELD: &str = "Unknown field";
}
