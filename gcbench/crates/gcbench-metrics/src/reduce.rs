//! Derived Quantities - Per-Run Scalars and Per-Cycle Distributions
//!
//! Every function here looks only at organic (non-forced) cycles. Point
//! metrics return NaN when they are undefined for the run; distributions
//! return an empty vector, which [`pctile`](crate::stats::pctile) turns
//! into NaN.

use crate::run::RunInfo;
use crate::stats::sum;
use gcbench_trace::{CycleField, Trace, TraceFormat, MB};

/// Organic collections per second
///
/// The window runs from the first organic cycle's start to the end of the
/// run, so start-up before the first collection is not counted.
pub fn gcs_per_sec(run: &RunInfo) -> f64 {
    let organic = run.trace.without_forced();
    let first = match organic.first() {
        Some(cycle) => cycle.start,
        None => return f64::NAN,
    };

    let window = run.elapsed().as_secs_f64() - first.as_secs_f64();
    if window <= 0.0 {
        return f64::NAN;
    }
    organic.len() as f64 / window
}

/// Sweep termination pauses in nanoseconds
pub fn sweep_term_ns(trace: &Trace) -> Vec<f64> {
    trace.without_forced().extract(CycleField::ClockSweepTerm).to_f64s()
}

/// Mark termination pauses in nanoseconds
pub fn mark_term_ns(trace: &Trace) -> Vec<f64> {
    trace.without_forced().extract(CycleField::ClockMarkTerm).to_f64s()
}

/// Megabytes marked per second of mark-phase CPU time, over the whole run
pub fn marked_mb_per_cpu_sec(trace: &Trace) -> f64 {
    let organic = trace.without_forced();
    let mark_ns = sum(&organic.extract(CycleField::CpuMark).to_f64s());
    let marked = sum(&organic.extract(CycleField::HeapMarked).to_f64s());
    if mark_ns == 0.0 {
        return f64::NAN;
    }
    marked * 1e9 / (mark_ns * MB as f64)
}

/// `actual / goal - 1` for every cycle whose goal is non-zero and at least
/// `floor` bytes
pub fn heap_overshoot(trace: &Trace, floor: u64) -> Vec<f64> {
    let organic = trace.without_forced();
    let actual = organic.extract(CycleField::HeapActual).to_f64s();
    let goal = organic.extract(CycleField::HeapGoal).to_f64s();
    let floor = floor as f64;

    actual
        .iter()
        .zip(&goal)
        .filter(|&(_, &goal)| goal > 0.0 && goal >= floor)
        .map(|(&actual, &goal)| actual / goal - 1.0)
        .collect()
}

/// Share of mark-phase capacity spent on assist and background work
///
/// `(assist + background) / (clock_mark * procs)` for every cycle with a
/// non-zero mark phase and a known processor count. Five-phase cycles are
/// skipped when `skip_five_phase` is set because that format does not
/// account this ratio reliably.
pub fn cpu_util(trace: &Trace, skip_five_phase: bool) -> Vec<f64> {
    let cycles: Trace = trace
        .iter()
        .filter(|c| !c.forced)
        .filter(|c| !(skip_five_phase && c.format == TraceFormat::FivePhase))
        .cloned()
        .collect();
    let assist = cycles.extract(CycleField::CpuAssist).to_f64s();
    let background = cycles.extract(CycleField::CpuBackground).to_f64s();
    let mark = cycles.extract(CycleField::ClockMark).to_f64s();
    let procs = cycles.extract(CycleField::Procs).to_f64s();

    (0..cycles.len())
        .filter(|&i| mark[i] > 0.0 && procs[i] > 0.0)
        .map(|i| (assist[i] + background[i]) / (mark[i] * procs[i]))
        .collect()
}
