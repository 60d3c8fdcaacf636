//! Rendering - Text Views of a Distribution
//!
//! Two views are produced from a [`Snapshot`]:
//!
//! - a table with one line per non-empty bucket
//! - a `width x height` histogram drawn with Unicode block elements
//!
//! The histogram resamples the 256 buckets into `width` columns, then maps
//! each column count through `ln(1 + count)` so one tall spike does not
//! flatten the rest of the distribution. Every row carries the count its
//! top edge stands for, computed with the inverse transform.
//!
//! ```text
//!       ▂█▃                    1043
//!      ▁███▅▁                   32.6
//!     ▁██████▂▁       ▁          1.97
//! ─┬───────┬────────┬───────┬──
//! 1ns      10ns     100ns   1µs
//! ```

use crate::dist::{LatencyDist, Snapshot, BUCKETS};
use crate::format::FmtDuration;
use std::fmt::Write;

/// Fill levels of one character cell, empty to full
const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Levels per character cell
const LEVELS: usize = BLOCKS.len() - 1;

/// Axis labels at successive powers of ten nanoseconds
const DECADES: [&str; 10] = [
    "1ns", "10ns", "100ns", "1µs", "10µs", "100µs", "1ms", "10ms", "100ms", "1s",
];

const EMPTY: &str = "no samples\n";

impl Snapshot {
    /// One `[lo,hi) count` line per non-empty bucket
    pub fn table(&self) -> String {
        if self.total() == 0 {
            return EMPTY.to_string();
        }

        let mut out = String::new();
        for (b, count) in self.nonempty() {
            let (lo, hi) = LatencyDist::from_bucket(b);
            let _ = writeln!(out, "[{:>12},{:>12}) {}", FmtDuration(lo), FmtDuration(hi), count);
        }
        out
    }

    /// Block-character histogram `width` columns wide and `height` rows tall,
    /// followed by a tick row and a label row
    pub fn hist(&self, width: usize, height: usize) -> String {
        if self.total() == 0 {
            return EMPTY.to_string();
        }
        let width = width.max(1);
        let height = height.max(1);

        let columns = self.resample(width);
        let peak = columns.iter().copied().fold(0.0f64, f64::max);
        let log_peak = peak.ln_1p();
        let steps = (height * LEVELS) as f64;

        let levels: Vec<usize> = columns
            .iter()
            .map(|&count| {
                if count <= 0.0 {
                    return 0;
                }
                let level = (count.ln_1p() / log_peak * steps).round() as usize;
                level.max(1)
            })
            .collect();

        let mut out = String::new();
        for row in (0..height).rev() {
            let floor = row * LEVELS;
            let line: String = levels
                .iter()
                .map(|&level| BLOCKS[level.saturating_sub(floor).min(LEVELS)])
                .collect();
            let threshold = ((row + 1) as f64 / height as f64 * log_peak).exp_m1();
            let _ = writeln!(out, "{} {}", line, count_label(threshold));
        }

        let ticks = tick_columns(width);
        let tick_row: String = (0..width)
            .map(|col| if ticks.contains(&col) { '┬' } else { '─' })
            .collect();
        out.push_str(&tick_row);
        out.push('\n');

        let mut labels: Vec<char> = Vec::new();
        for (decade, &col) in ticks.iter().enumerate() {
            if col < labels.len() {
                continue;
            }
            if col > labels.len() {
                labels.resize(col, ' ');
            }
            labels.extend(DECADES[decade].chars());
            labels.push(' ');
        }
        let label_row: String = labels.into_iter().collect();
        out.push_str(label_row.trim_end());
        out.push('\n');
        out
    }

    /// Spread bucket counts over `width` columns
    ///
    /// Column `c` covers the fractional bucket range
    /// `[c * 256 / width, (c + 1) * 256 / width)`; a bucket cut by a column
    /// edge contributes in proportion to the overlap.
    fn resample(&self, width: usize) -> Vec<f64> {
        let scale = BUCKETS as f64 / width as f64;
        (0..width)
            .map(|col| {
                let lo = col as f64 * scale;
                let hi = (col + 1) as f64 * scale;
                let first = lo.floor() as usize;
                let last = (hi.ceil() as usize).min(BUCKETS);
                (first..last)
                    .map(|b| {
                        let overlap = hi.min((b + 1) as f64) - lo.max(b as f64);
                        self.buckets[b] as f64 * overlap.max(0.0)
                    })
                    .sum()
            })
            .collect()
    }
}

impl LatencyDist {
    /// See [`Snapshot::table`]
    pub fn table(&self) -> String {
        self.snapshot().table()
    }

    /// See [`Snapshot::hist`]
    pub fn hist(&self, width: usize, height: usize) -> String {
        self.snapshot().hist(width, height)
    }
}

/// Columns holding 1ns, 10ns, ... 1s
///
/// `10^k ns` sits at bucket `256 * k / 9` because the ceiling is `10^9 ns`.
fn tick_columns(width: usize) -> Vec<usize> {
    let scale = BUCKETS as f64 / width as f64;
    (0..DECADES.len())
        .map(|k| {
            let bucket = (BUCKETS * k) as f64 / (DECADES.len() - 1) as f64;
            ((bucket / scale).floor() as usize).min(width - 1)
        })
        .collect()
}

fn count_label(value: f64) -> String {
    if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}
