//! Error Module - Trace Parse Errors
//!
//! Every error aborts the whole parse. A trace with a dropped cycle would
//! skew every statistic computed from it, so there is no partial result.
//!
//! # Error Categories
//!
//! - `UnknownPart` - a detail part matching none of the known part grammars
//! - `PhaseArity` - a phase list with neither 3 nor 5 phases
//! - `CpuBreakdown` - a `/` group that is not assist/background/idle
//! - `InvalidNumber` - a value that fits the grammar but is not a number,
//!   or a utilization above 100%

use thiserror::Error;

/// Errors produced while parsing gctrace text
///
/// Line numbers are 1-based and count every line of the input, including
/// the non-trace lines interleaved with the cycle lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// A comma-separated part of the detail section is not one of clock,
    /// cpu, heap, goal or procs.
    #[error("line {line}: failed to parse part of gctrace line: {part:?}")]
    UnknownPart { line: usize, part: String },

    /// A clock or cpu phase list has an unsupported number of phases.
    #[error("line {line}: unexpected number of {kind} phases: {count}")]
    PhaseArity {
        line: usize,
        kind: PhaseKind,
        count: usize,
    },

    /// A cpu phase split with `/` into something other than three values.
    #[error("line {line}: cpu phase {part:?} is not assist/background/idle")]
    CpuBreakdown { line: usize, part: String },

    /// A token fits the character class of its field but does not parse.
    #[error("line {line}: invalid number {text:?}")]
    InvalidNumber { line: usize, text: String },
}

impl TraceError {
    /// Line of the input the error was found on
    pub fn line(&self) -> usize {
        match self {
            TraceError::UnknownPart { line, .. }
            | TraceError::PhaseArity { line, .. }
            | TraceError::CpuBreakdown { line, .. }
            | TraceError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Which phase list a [`TraceError::PhaseArity`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Clock,
    Cpu,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Clock => f.write_str("clock"),
            PhaseKind::Cpu => f.write_str("cpu"),
        }
    }
}

/// Result type alias for trace parsing
pub type Result<T> = std::result::Result<T, TraceError>;
