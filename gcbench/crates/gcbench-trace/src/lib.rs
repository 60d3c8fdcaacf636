//! # gcbench-trace - gctrace Parsing
//!
//! Parses the per-cycle trace lines a garbage collector prints when tracing
//! is enabled, and exposes the result as a [`Trace`] of [`GcCycle`]
//! records.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcbench_trace::{parse_trace, CycleField, TraceFormat};
//!
//! let output = "\
//! gc 1 @0.012s 0%: 0.011+0.39+0.0061 ms clock, 0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P
//! some other program output
//! gc 2 @0.020s 1%: 0.010+0.50+0.0050 ms clock, 0.010+0.20/0.30/0.01+0.0050 ms cpu, 4->5->2 MB, 6 MB goal, 4 P (forced)
//! ";
//!
//! let trace = parse_trace(output)?;
//! assert_eq!(trace.len(), 2);
//! assert_eq!(trace[0].format, TraceFormat::ThreePhase);
//! assert_eq!(trace.without_forced().len(), 1);
//!
//! let mark_term = trace.extract(CycleField::ClockMarkTerm);
//! assert_eq!(mark_term.len(), 2);
//! # Ok::<(), gcbench_trace::TraceError>(())
//! ```
//!
//! ## Formats
//!
//! Two layouts of the line are understood. The older one lists five
//! wall-clock phases (`sweep-term + root-scan + sync + mark + mark-term`);
//! the newer one lists three (`sweep-term + mark + mark-term`). The layout
//! is chosen per line from the phase count.

pub mod cycle;
pub mod error;
pub mod field;
pub mod parser;
pub mod trace;

pub use cycle::{GcCycle, Phases, TraceFormat, MB};
pub use error::{PhaseKind, Result, TraceError};
pub use field::{Column, CycleField, FieldKind, UnknownField};
pub use parser::{is_cycle_line, parse_cycle_line, parse_trace, TraceParser};
pub use trace::Trace;
