//! Field Projection - Named Columns over a Trace
//!
//! Metrics ask for "the `clock_mark_term` of every cycle" without a
//! hand-written accessor per metric. Each numeric field of [`GcCycle`] is
//! listed once in the table below with its name, its kind and a typed
//! getter. Projection walks the trace once and yields a homogeneous
//! [`Column`].

use crate::cycle::GcCycle;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A field name that is not part of the cycle record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cycle field: {0}")]
pub struct UnknownField(pub String);

/// Value type of a projected field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Duration,
    Bytes,
    Count,
    Ratio,
}

enum Getter {
    Duration(fn(&GcCycle) -> Duration),
    Bytes(fn(&GcCycle) -> u64),
    Count(fn(&GcCycle) -> u64),
    Ratio(fn(&GcCycle) -> f64),
}

macro_rules! cycle_fields {
    ($($variant:ident => $name:literal, $kind:ident, |$c:ident| $get:expr;)*) => {
        /// Numeric fields of [`GcCycle`] that can be projected by name
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CycleField {
            $($variant,)*
        }

        impl CycleField {
            /// Every field, in record order
            pub const ALL: &'static [CycleField] = &[$(CycleField::$variant,)*];

            /// Name used by [`CycleField::lookup`]
            pub fn name(self) -> &'static str {
                match self {
                    $(CycleField::$variant => $name,)*
                }
            }

            fn getter(self) -> Getter {
                match self {
                    $(CycleField::$variant => Getter::$kind(|$c: &GcCycle| $get),)*
                }
            }
        }
    };
}

cycle_fields! {
    N => "n", Count, |c| c.n;
    Start => "start", Duration, |c| c.start;
    End => "end", Duration, |c| c.end;
    Util => "util", Ratio, |c| c.util;
    ClockSweepTerm => "clock_sweep_term", Duration, |c| c.clock_sweep_term;
    ClockRootScan => "clock_root_scan", Duration, |c| c.clock_root_scan;
    ClockSync => "clock_sync", Duration, |c| c.clock_sync;
    ClockMark => "clock_mark", Duration, |c| c.clock_mark;
    ClockMarkTerm => "clock_mark_term", Duration, |c| c.clock_mark_term;
    CpuSweepTerm => "cpu_sweep_term", Duration, |c| c.cpu_sweep_term;
    CpuRootScan => "cpu_root_scan", Duration, |c| c.cpu_root_scan;
    CpuSync => "cpu_sync", Duration, |c| c.cpu_sync;
    CpuMark => "cpu_mark", Duration, |c| c.cpu_mark;
    CpuMarkTerm => "cpu_mark_term", Duration, |c| c.cpu_mark_term;
    CpuAssist => "cpu_assist", Duration, |c| c.cpu_assist;
    CpuBackground => "cpu_background", Duration, |c| c.cpu_background;
    CpuIdle => "cpu_idle", Duration, |c| c.cpu_idle;
    HeapTrigger => "heap_trigger", Bytes, |c| c.heap_trigger;
    HeapActual => "heap_actual", Bytes, |c| c.heap_actual;
    HeapMarked => "heap_marked", Bytes, |c| c.heap_marked;
    HeapGoal => "heap_goal", Bytes, |c| c.heap_goal;
    Procs => "procs", Count, |c| u64::from(c.procs);
}

impl CycleField {
    /// Find a field by name
    pub fn lookup(name: &str) -> Result<Self, UnknownField> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| UnknownField(name.to_string()))
    }

    pub fn kind(self) -> FieldKind {
        match self.getter() {
            Getter::Duration(_) => FieldKind::Duration,
            Getter::Bytes(_) => FieldKind::Bytes,
            Getter::Count(_) => FieldKind::Count,
            Getter::Ratio(_) => FieldKind::Ratio,
        }
    }

    /// Collect this field from every cycle
    pub fn project(self, cycles: &[GcCycle]) -> Column {
        match self.getter() {
            Getter::Duration(get) => Column::Durations(cycles.iter().map(get).collect()),
            Getter::Bytes(get) => Column::Bytes(cycles.iter().map(get).collect()),
            Getter::Count(get) => Column::Counts(cycles.iter().map(get).collect()),
            Getter::Ratio(get) => Column::Ratios(cycles.iter().map(get).collect()),
        }
    }
}

impl fmt::Display for CycleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CycleField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

/// Values of one field across a trace
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Durations(Vec<Duration>),
    Bytes(Vec<u64>),
    Counts(Vec<u64>),
    Ratios(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Durations(v) => v.len(),
            Column::Bytes(v) | Column::Counts(v) => v.len(),
            Column::Ratios(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Column::Durations(_) => FieldKind::Duration,
            Column::Bytes(_) => FieldKind::Bytes,
            Column::Counts(_) => FieldKind::Count,
            Column::Ratios(_) => FieldKind::Ratio,
        }
    }

    pub fn as_durations(&self) -> Option<&[Duration]> {
        match self {
            Column::Durations(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u64]> {
        match self {
            Column::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Convert to floats; durations become nanoseconds
    pub fn to_f64s(&self) -> Vec<f64> {
        match self {
            Column::Durations(v) => v.iter().map(|d| d.as_nanos() as f64).collect(),
            Column::Bytes(v) | Column::Counts(v) => v.iter().map(|&x| x as f64).collect(),
            Column::Ratios(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_name() {
        for &field in CycleField::ALL {
            assert_eq!(CycleField::lookup(field.name()), Ok(field));
        }
        assert_eq!(CycleField::ALL.len(), 22);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = "ClockMarkTerm".parse::<CycleField>().unwrap_err();
        assert_eq!(err.to_string(), "unknown cycle field: ClockMarkTerm");
    }

    #[test]
    fn test_project_kinds() {
        let cycles = vec![
            GcCycle {
                clock_mark_term: Duration::from_micros(5),
                heap_goal: 7,
                procs: 4,
                util: 0.5,
                ..GcCycle::new(1)
            },
            GcCycle {
                clock_mark_term: Duration::from_micros(9),
                heap_goal: 11,
                procs: 8,
                util: 0.25,
                ..GcCycle::new(2)
            },
        ];

        let term = CycleField::ClockMarkTerm.project(&cycles);
        assert_eq!(
            term.as_durations(),
            Some(&[Duration::from_micros(5), Duration::from_micros(9)][..])
        );
        assert_eq!(term.to_f64s(), vec![5_000.0, 9_000.0]);

        assert_eq!(CycleField::HeapGoal.project(&cycles).as_bytes(), Some(&[7, 11][..]));
        assert_eq!(CycleField::Procs.project(&cycles), Column::Counts(vec![4, 8]));
        assert_eq!(CycleField::Util.project(&cycles), Column::Ratios(vec![0.5, 0.25]));
        assert_eq!(CycleField::Util.kind(), FieldKind::Ratio);
    }

    #[test]
    fn test_project_empty() {
        let column = CycleField::CpuAssist.project(&[]);
        assert!(column.is_empty());
        assert_eq!(column.kind(), FieldKind::Duration);
    }
}
