//! gcbt - GC benchmark trace tool.
//!
//! This is the main entry point for the gcbt CLI application.
//! It uses clap for argument parsing and dispatches to appropriate
//! command handlers based on user input.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    run_stdio, ConfigArgs, ConfigCommand, CyclesArgs, CyclesCommand, ExtractArgs,
    ExtractCommand, LatencyArgs, LatencyCommand, ReportArgs, ReportCommand,
};
use config::Config;
use error::{GcbtError, Result};

/// gcbt - GC health metrics from gctrace output
///
/// gcbt parses the per-cycle trace lines a collector prints, derives pause,
/// throughput and heap-pacing metrics from them, and renders latency
/// histograms.
#[derive(Parser, Debug)]
#[command(name = "gcbt")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GC trace metrics and latency histograms", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "GCBT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GCBT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "GCBT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the gcbt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the GC metrics of a run
    ///
    /// Parses the trace in a program's output and prints one report line
    /// with the standard metrics and any `metric <value> <name>` lines.
    /// Threshold warnings go to standard error.
    Report(ReportCommandArgs),

    /// List parsed GC cycles
    Cycles(CyclesCommandArgs),

    /// Print one field of every cycle
    Extract(ExtractCommandArgs),

    /// Render a latency histogram
    ///
    /// Reads one duration per line, either integer nanoseconds or a number
    /// with a ns, us, µs, ms or s suffix.
    Latency(LatencyCommandArgs),

    /// Print the effective configuration
    Config(ConfigCommandArgs),
}

/// Arguments for the report subcommand.
#[derive(Parser, Debug)]
struct ReportCommandArgs {
    /// Program output to read (`-` for stdin)
    input: PathBuf,

    /// Benchmark name printed before the values
    #[arg(short, long)]
    name: Option<String>,

    /// Configuration entry added to the benchmark name (key=value, repeatable)
    #[arg(short, long = "label", value_parser = parse_label)]
    labels: Vec<(String, String)>,

    /// Wall-clock run length in seconds (default: end of the last cycle)
    #[arg(short, long)]
    elapsed: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Echo non-GC lines to stderr
    #[arg(short, long)]
    passthrough: bool,
}

/// Arguments for the cycles subcommand.
#[derive(Parser, Debug)]
struct CyclesCommandArgs {
    /// Program output to read (`-` for stdin)
    input: PathBuf,

    /// Print the cycles as JSON
    #[arg(long)]
    json: bool,

    /// Leave forced cycles out
    #[arg(long)]
    without_forced: bool,
}

/// Arguments for the extract subcommand.
#[derive(Parser, Debug)]
struct ExtractCommandArgs {
    /// Program output to read (`-` for stdin)
    input: PathBuf,

    /// Cycle field to print (e.g. clock_mark_term, heap_goal, procs)
    #[arg(short, long)]
    field: String,

    /// Leave forced cycles out
    #[arg(long)]
    without_forced: bool,
}

/// Arguments for the latency subcommand.
#[derive(Parser, Debug)]
struct LatencyCommandArgs {
    /// Sample file to read (`-` for stdin)
    input: PathBuf,

    /// Histogram columns (default: from config)
    #[arg(long)]
    width: Option<usize>,

    /// Histogram rows (default: from config)
    #[arg(long)]
    height: Option<usize>,

    /// Print the bucket table instead of the histogram
    #[arg(long)]
    table: bool,

    /// Number of producer threads (default: from config)
    #[arg(short, long)]
    jobs: Option<usize>,
}

/// Arguments for the config subcommand.
#[derive(Parser, Debug)]
struct ConfigCommandArgs {
    /// Also save the configuration to this path
    #[arg(long)]
    save: Option<PathBuf>,
}

/// Parse a `key=value` benchmark label.
fn parse_label(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", s)),
    }
}

/// Main entry point for the gcbt CLI.
///
/// Errors are printed with their message and turn into exit status 1.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Initialize logging, load configuration, and dispatch to the
/// appropriate command handler.
fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    init_logging(cli.verbose, cli.no_color)?;

    // Load configuration
    let mut config = load_config(cli.config.as_deref())?;
    config.verbose |= cli.verbose;

    // Execute the selected command
    execute_command(cli.command, &config)
}

/// Initialize the logging system.
///
/// Logs go to stderr so they never mix with command output. Threshold
/// warnings are already printed by the report command, so the metrics
/// library is held to errors unless verbose.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info,gcbench_metrics=error")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| GcbtError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Report(args) => run_stdio::<ReportCommand>(
            ReportArgs {
                input: args.input,
                name: args.name,
                labels: args.labels,
                elapsed: args.elapsed,
                json: args.json,
                passthrough: args.passthrough,
            },
            config,
        ),
        Commands::Cycles(args) => run_stdio::<CyclesCommand>(
            CyclesArgs {
                input: args.input,
                json: args.json,
                without_forced: args.without_forced,
            },
            config,
        ),
        Commands::Extract(args) => run_stdio::<ExtractCommand>(
            ExtractArgs {
                input: args.input,
                field: args.field,
                without_forced: args.without_forced,
            },
            config,
        ),
        Commands::Latency(args) => run_stdio::<LatencyCommand>(
            LatencyArgs {
                input: args.input,
                width: args.width,
                height: args.height,
                table: args.table,
                jobs: args.jobs,
            },
            config,
        ),
        Commands::Config(args) => {
            run_stdio::<ConfigCommand>(ConfigArgs { save: args.save }, config)
        }
    }
}
