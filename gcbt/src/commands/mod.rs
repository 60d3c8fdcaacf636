//! Command modules for the gcbt CLI.
//!
//! This module contains implementations for all available subcommands.
//! Each subcommand is implemented in its own file following a standardized pattern.

pub mod traits;
pub mod common;

pub mod report;
pub mod cycles;
pub mod extract;
pub mod latency;
pub mod config;

// Re-export command types
pub use config::{ConfigArgs, ConfigCommand};
pub use cycles::{CyclesArgs, CyclesCommand};
pub use extract::{ExtractArgs, ExtractCommand};
pub use latency::{LatencyArgs, LatencyCommand};
pub use report::{ReportArgs, ReportCommand};
pub use traits::{run_stdio, Command};
