//! GC Cycle Record - One Line of gctrace Output
//!
//! A [`GcCycle`] is built by the parser from a single `gc N @...` line and
//! never changes afterwards. Phase timings are kept as [`Duration`]s so
//! that sums over many cycles stay exact.

use serde::Serialize;
use std::time::Duration;

/// Bytes per megabyte as printed by gctrace (`MB` is 2^20 bytes)
pub const MB: u64 = 1024 * 1024;

/// Variant of the gctrace line layout
///
/// The collector used to report five wall-clock phases and later folded
/// root scanning and sync into the mark phase. The variant is picked from
/// the number of phases on the line, never from a version flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFormat {
    /// `sweep-term + root-scan + sync + mark + mark-term`
    FivePhase,
    /// `sweep-term + mark + mark-term`
    #[default]
    ThreePhase,
}

impl TraceFormat {
    /// Select the format from the arity of a phase list
    pub fn from_phase_count(count: usize) -> Option<Self> {
        match count {
            5 => Some(TraceFormat::FivePhase),
            3 => Some(TraceFormat::ThreePhase),
            _ => None,
        }
    }
}

/// Per-phase durations, in the order the five-phase format lists them
///
/// Under [`TraceFormat::ThreePhase`], `root_scan` and `sync` are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phases {
    pub sweep_term: Duration,
    pub root_scan: Duration,
    pub sync: Duration,
    pub mark: Duration,
    pub mark_term: Duration,
}

impl Phases {
    /// Distribute a parsed phase list over the named phases
    ///
    /// Returns `None` when the list length is not a known format.
    pub fn from_list(list: &[Duration]) -> Option<(TraceFormat, Self)> {
        let format = TraceFormat::from_phase_count(list.len())?;
        let phases = match format {
            TraceFormat::FivePhase => Phases {
                sweep_term: list[0],
                root_scan: list[1],
                sync: list[2],
                mark: list[3],
                mark_term: list[4],
            },
            TraceFormat::ThreePhase => Phases {
                sweep_term: list[0],
                mark: list[1],
                mark_term: list[2],
                ..Default::default()
            },
        };
        Some((format, phases))
    }

    /// Sum of all phases
    pub fn total(&self) -> Duration {
        self.sweep_term + self.root_scan + self.sync + self.mark + self.mark_term
    }
}

/// One completed garbage collection cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GcCycle {
    /// 1-based index of this cycle
    pub n: u64,

    /// Line layout this cycle was parsed from
    pub format: TraceFormat,

    /// Start and end of the cycle relative to program start
    #[serde(with = "nanos")]
    pub start: Duration,
    #[serde(with = "nanos")]
    pub end: Duration,

    /// Overall CPU fraction used by GC since program start, in [0, 1]
    ///
    /// The parser rejects percentages above 100.
    pub util: f64,

    /// True if the cycle was forced (explicit or STW request)
    pub forced: bool,

    /// Wall-clock durations of each phase.
    /// Sweep termination, sync and mark termination are STW.
    #[serde(with = "nanos")]
    pub clock_sweep_term: Duration,
    #[serde(with = "nanos")]
    pub clock_root_scan: Duration,
    #[serde(with = "nanos")]
    pub clock_sync: Duration,
    #[serde(with = "nanos")]
    pub clock_mark: Duration,
    #[serde(with = "nanos")]
    pub clock_mark_term: Duration,

    /// CPU time of each phase
    #[serde(with = "nanos")]
    pub cpu_sweep_term: Duration,
    #[serde(with = "nanos")]
    pub cpu_root_scan: Duration,
    #[serde(with = "nanos")]
    pub cpu_sync: Duration,
    #[serde(with = "nanos")]
    pub cpu_mark: Duration,
    #[serde(with = "nanos")]
    pub cpu_mark_term: Duration,

    /// Breakdown of `cpu_mark` into its components
    #[serde(with = "nanos")]
    pub cpu_assist: Duration,
    #[serde(with = "nanos")]
    pub cpu_background: Duration,
    #[serde(with = "nanos")]
    pub cpu_idle: Duration,

    /// Heap size (bytes) at which this cycle was triggered
    pub heap_trigger: u64,

    /// Heap size (bytes) when marking finished, before sweeping
    pub heap_actual: u64,

    /// Bytes marked by this cycle, retained by sweeping
    pub heap_marked: u64,

    /// Heap size (bytes) this cycle aimed to finish at
    pub heap_goal: u64,

    /// Number of execution contexts (P's) during the cycle
    pub procs: u32,
}

impl GcCycle {
    pub fn new(n: u64) -> Self {
        Self {
            n,
            ..Default::default()
        }
    }

    /// Wall-clock phases as a group
    pub fn clock(&self) -> Phases {
        Phases {
            sweep_term: self.clock_sweep_term,
            root_scan: self.clock_root_scan,
            sync: self.clock_sync,
            mark: self.clock_mark,
            mark_term: self.clock_mark_term,
        }
    }

    /// CPU phases as a group
    pub fn cpu(&self) -> Phases {
        Phases {
            sweep_term: self.cpu_sweep_term,
            root_scan: self.cpu_root_scan,
            sync: self.cpu_sync,
            mark: self.cpu_mark,
            mark_term: self.cpu_mark_term,
        }
    }

    pub(crate) fn set_clock(&mut self, phases: Phases) {
        self.clock_sweep_term = phases.sweep_term;
        self.clock_root_scan = phases.root_scan;
        self.clock_sync = phases.sync;
        self.clock_mark = phases.mark;
        self.clock_mark_term = phases.mark_term;
    }

    pub(crate) fn set_cpu(&mut self, phases: Phases) {
        self.cpu_sweep_term = phases.sweep_term;
        self.cpu_root_scan = phases.root_scan;
        self.cpu_sync = phases.sync;
        self.cpu_mark = phases.mark;
        self.cpu_mark_term = phases.mark_term;
    }

    /// Wall-clock length of the cycle
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Total stop-the-world time (sweep termination, sync, mark termination)
    pub fn stw_time(&self) -> Duration {
        self.clock_sweep_term + self.clock_sync + self.clock_mark_term
    }
}

/// Serialize durations as integer nanoseconds
mod nanos {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_nanos() as u64)
    }
}
