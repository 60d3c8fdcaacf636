//! Extract command implementation.
//!
//! Projects one numeric field out of every cycle of a trace.

use std::io::Write;
use std::path::PathBuf;

use gcbench_trace::{parse_trace, CycleField};

use crate::commands::common::{error_messages, read_input};
use crate::commands::traits::Command;
use crate::config::Config;
use crate::error::{GcbtError, Result};

/// Arguments for the extract command.
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Program output to read, `-` for standard input.
    pub input: PathBuf,
    /// Cycle field to print.
    pub field: String,
    /// Leave forced cycles out.
    pub without_forced: bool,
}

/// Extract command handler.
pub struct ExtractCommand {
    args: ExtractArgs,
}

impl ExtractCommand {
    /// Resolve the requested field, listing the valid names when it is unknown.
    fn field(&self) -> Result<CycleField> {
        CycleField::lookup(&self.args.field).map_err(|_| {
            let names: Vec<&str> = CycleField::ALL.iter().map(|f| f.name()).collect();
            GcbtError::Validation(format!(
                "{} {:?}; expected one of: {}",
                error_messages::UNKNOWN_FIELD,
                self.args.field,
                names.join(", ")
            ))
        })
    }
}

impl Command for ExtractCommand {
    type Args = ExtractArgs;

    fn new(args: Self::Args, _config: &Config) -> Self {
        Self { args }
    }

    fn execute(&self, out: &mut dyn Write, _err: &mut dyn Write) -> Result<()> {
        let field = self.field()?;
        let mut trace = parse_trace(&read_input(&self.args.input)?)?;
        if self.args.without_forced {
            trace = trace.without_forced();
        }

        for value in trace.extract(field).to_f64s() {
            writeln!(out, "{}", value)?;
        }
        Ok(())
    }

    fn name() -> &'static str {
        "extract"
    }
}
