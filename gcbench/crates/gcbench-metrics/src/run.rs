//! Run Context - A Trace and the Wall-Clock Window It Came From

use chrono::{DateTime, Utc};
use gcbench_trace::Trace;
use std::time::Duration;

/// One measured execution
///
/// Cycle start times in the trace are offsets from process start, which is
/// taken to coincide with `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub trace: Trace,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RunInfo {
    pub fn new(trace: Trace, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { trace, start, end }
    }

    /// Run of known length with an arbitrary start
    pub fn with_elapsed(trace: Trace, elapsed: Duration) -> Self {
        let start = DateTime::<Utc>::default();
        let nanos = i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX);
        let end = start
            .checked_add_signed(chrono::Duration::nanoseconds(nanos))
            .unwrap_or(start);
        Self::new(trace, start, end)
    }

    /// Run whose length is unknown; it is taken to end with the last cycle
    pub fn from_trace(trace: Trace) -> Self {
        let elapsed = trace.last().map(|c| c.end).unwrap_or_default();
        Self::with_elapsed(trace, elapsed)
    }

    /// Wall-clock length of the run, zero if `end` precedes `start`
    pub fn elapsed(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcbench_trace::GcCycle;

    #[test]
    fn test_with_elapsed() {
        let run = RunInfo::with_elapsed(Trace::new(), Duration::from_millis(1500));
        assert_eq!(run.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_from_trace_uses_last_end() {
        let trace: Trace = vec![
            GcCycle {
                end: Duration::from_millis(40),
                ..GcCycle::new(1)
            },
            GcCycle {
                end: Duration::from_millis(90),
                ..GcCycle::new(2)
            },
        ]
        .into();
        assert_eq!(RunInfo::from_trace(trace).elapsed(), Duration::from_millis(90));
        assert_eq!(RunInfo::from_trace(Trace::new()).elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_backwards_window_is_zero() {
        let later = Utc::now();
        let earlier = later - chrono::Duration::seconds(1);
        assert_eq!(RunInfo::new(Trace::new(), later, earlier).elapsed(), Duration::ZERO);
    }
}
