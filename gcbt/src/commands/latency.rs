//! Latency command implementation.
//!
//! Reads one duration sample per line, records them into a shared
//! [`LatencyDist`] from several producer threads and prints the histogram
//! followed by the latency summary metrics.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use gcbench_lat::LatencyDist;
use gcbench_metrics::{latency_extras, sigfigs};
use tracing::debug;

use crate::commands::common::{error_messages, parse_sample, read_input};
use crate::commands::traits::Command;
use crate::config::{Config, HistogramConfig};
use crate::error::{GcbtError, Result};

/// Arguments for the latency command.
#[derive(Debug, Clone, Default)]
pub struct LatencyArgs {
    /// Sample file to read, `-` for standard input.
    pub input: PathBuf,
    /// Histogram columns (default: from config).
    pub width: Option<usize>,
    /// Histogram rows (default: from config).
    pub height: Option<usize>,
    /// Print the bucket table instead of the histogram.
    pub table: bool,
    /// Producer threads (default: from config).
    pub jobs: Option<usize>,
}

/// Latency command handler.
pub struct LatencyCommand {
    args: LatencyArgs,
    histogram: HistogramConfig,
}

impl LatencyCommand {
    /// Get the effective histogram configuration.
    pub fn get_histogram_config(&self) -> Result<HistogramConfig> {
        let mut config = self.histogram.clone();

        if let Some(width) = self.args.width {
            config.width = width;
        }

        if let Some(height) = self.args.height {
            config.height = height;
        }

        if let Some(jobs) = self.args.jobs {
            config.jobs = jobs;
        }

        if config.width == 0 || config.height == 0 || config.jobs == 0 {
            return Err(GcbtError::Validation(
                "width, height and jobs must be positive".to_string(),
            ));
        }

        Ok(config)
    }

    /// Record every sample into one distribution from `jobs` threads.
    pub fn record(samples: &[Duration], jobs: usize) -> Result<LatencyDist> {
        let dist = LatencyDist::new();
        let chunk = samples.len().div_ceil(jobs).max(1);

        crossbeam::scope(|s| {
            for part in samples.chunks(chunk) {
                let dist = &dist;
                s.spawn(move |_| {
                    for &sample in part {
                        dist.add(sample);
                    }
                });
            }
        })
        .map_err(|_| GcbtError::Validation("latency producer panicked".to_string()))?;

        debug!("recorded {} samples from {} producers", dist.count(), jobs);
        Ok(dist)
    }
}

/// Parse every non-blank, non-comment line as a sample.
pub fn parse_samples(text: &str) -> Result<Vec<Duration>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            parse_sample(line).ok_or_else(|| {
                GcbtError::Validation(format!(
                    "{} on line {}: {:?}",
                    error_messages::INVALID_SAMPLE,
                    i + 1,
                    line.trim()
                ))
            })
        })
        .collect()
}

impl Command for LatencyCommand {
    type Args = LatencyArgs;

    fn new(args: Self::Args, config: &Config) -> Self {
        Self {
            args,
            histogram: config.histogram.clone(),
        }
    }

    fn execute(&self, out: &mut dyn Write, _err: &mut dyn Write) -> Result<()> {
        let config = self.get_histogram_config()?;
        let samples = parse_samples(&read_input(&self.args.input)?)?;
        let dist = Self::record(&samples, config.jobs)?;

        if self.args.table {
            write!(out, "{}", dist.table())?;
        } else {
            write!(out, "{}", dist.hist(config.width, config.height))?;
        }

        if dist.count() > 0 {
            for (name, value) in latency_extras(&dist) {
                writeln!(out, "{:>10} {}", sigfigs(value), name)?;
            }
        }
        Ok(())
    }

    fn name() -> &'static str {
        "latency"
    }
}
