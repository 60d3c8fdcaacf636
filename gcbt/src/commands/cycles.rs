//! Cycles command implementation.
//!
//! Prints every parsed GC cycle, one row each, or the whole trace as JSON.

use std::io::Write;
use std::path::PathBuf;

use gcbench_lat::FmtDuration;
use gcbench_trace::{parse_trace, GcCycle, Trace, TraceFormat, MB};

use crate::commands::common::read_input;
use crate::commands::traits::Command;
use crate::config::Config;
use crate::error::Result;

/// Arguments for the cycles command.
#[derive(Debug, Clone, Default)]
pub struct CyclesArgs {
    /// Program output to read, `-` for standard input.
    pub input: PathBuf,
    /// Print the cycles as JSON.
    pub json: bool,
    /// Leave forced cycles out.
    pub without_forced: bool,
}

/// Cycles command handler.
pub struct CyclesCommand {
    args: CyclesArgs,
}

const HEADER: &str = "    n       start    duration         stw        mark     heap MB     goal MB   P  flags";

impl CyclesCommand {
    /// Parse and filter the trace named by the arguments.
    fn load(&self) -> Result<Trace> {
        let trace = parse_trace(&read_input(&self.args.input)?)?;
        Ok(if self.args.without_forced {
            trace.without_forced()
        } else {
            trace
        })
    }

    /// One table row.
    fn row(cycle: &GcCycle) -> String {
        let mut flags = vec![match cycle.format {
            TraceFormat::FivePhase => "5-phase",
            TraceFormat::ThreePhase => "3-phase",
        }];
        if cycle.forced {
            flags.push("forced");
        }
        format!(
            "{:>5} {:>11} {:>11} {:>11} {:>11} {:>11.1} {:>11.1} {:>3}  {}",
            cycle.n,
            FmtDuration(cycle.start),
            FmtDuration(cycle.duration()),
            FmtDuration(cycle.stw_time()),
            FmtDuration(cycle.clock_mark),
            cycle.heap_actual as f64 / MB as f64,
            cycle.heap_goal as f64 / MB as f64,
            cycle.procs,
            flags.join(",")
        )
    }
}

impl Command for CyclesCommand {
    type Args = CyclesArgs;

    fn new(args: Self::Args, _config: &Config) -> Self {
        Self { args }
    }

    fn execute(&self, out: &mut dyn Write, _err: &mut dyn Write) -> Result<()> {
        let trace = self.load()?;

        if self.args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&trace)?)?;
            return Ok(());
        }

        writeln!(out, "{}", HEADER)?;
        for cycle in trace.iter() {
            writeln!(out, "{}", Self::row(cycle))?;
        }
        Ok(())
    }

    fn name() -> &'static str {
        "cycles"
    }
}
