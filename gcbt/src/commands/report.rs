//! Report command implementation.
//!
//! Parses a program's output, evaluates the standard GC metrics and prints
//! them as one report line, with threshold warnings on the error stream.

use std::io::Write;
use std::path::PathBuf;

use gcbench_metrics::{
    alignment, benchmark_name, parse_extra_metrics, passthrough_lines, MetricConfig,
    MetricsEngine, Report, RunInfo,
};
use gcbench_trace::parse_trace;
use tracing::debug;

use crate::commands::common::{parse_seconds, read_input};
use crate::commands::traits::Command;
use crate::config::Config;
use crate::error::Result;

/// Arguments for the report command.
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Program output to read, `-` for standard input.
    pub input: PathBuf,
    /// Benchmark name printed before the values.
    pub name: Option<String>,
    /// Configuration entries appended to the benchmark name.
    pub labels: Vec<(String, String)>,
    /// Wall-clock length of the run in seconds.
    pub elapsed: Option<f64>,
    /// Print the report as JSON.
    pub json: bool,
    /// Echo lines that are not GC or metric lines to the error stream.
    pub passthrough: bool,
}

/// Report command handler.
pub struct ReportCommand {
    args: ReportArgs,
    metrics: MetricConfig,
    align_tabs: usize,
}

impl ReportCommand {
    /// Evaluate the metrics of one output.
    pub fn evaluate(&self, text: &str) -> Result<Report> {
        let trace = parse_trace(text)?;
        debug!("parsed {} GC cycles", trace.len());
        let procs = trace.last().map_or(1, |c| c.procs.max(1) as usize);

        let run = match self.args.elapsed {
            Some(secs) => RunInfo::with_elapsed(trace, parse_seconds(secs)?),
            None => RunInfo::from_trace(trace),
        };
        debug!("run length {:?}", run.elapsed());

        let mut report = MetricsEngine::standard(&self.metrics)
            .evaluate(&run)
            .with_extras(parse_extra_metrics(text));
        if let Some(name) = &self.args.name {
            let labels: Vec<(&str, String)> = self
                .args
                .labels
                .iter()
                .map(|(k, v)| (k.as_str(), v.clone()))
                .collect();
            report = report.named(benchmark_name(name, &labels, procs));
        }
        Ok(report)
    }
}

impl Command for ReportCommand {
    type Args = ReportArgs;

    fn new(args: Self::Args, config: &Config) -> Self {
        Self {
            args,
            metrics: config.metrics.clone(),
            align_tabs: config.report.align_tabs,
        }
    }

    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let text = read_input(&self.args.input)?;

        if self.args.passthrough {
            for line in passthrough_lines(&text) {
                writeln!(err, "{}", line)?;
            }
        }

        let report = self.evaluate(&text)?;
        if self.args.json {
            writeln!(out, "{}", report.to_json()?)?;
            for warning in &report.warnings {
                writeln!(err, "{}", warning)?;
            }
        } else {
            let term = std::env::var("TERM").ok();
            let align = alignment(term.as_deref(), self.align_tabs);
            report.write_to(out, err, &align)?;
        }
        Ok(())
    }

    fn name() -> &'static str {
        "report"
    }
}
