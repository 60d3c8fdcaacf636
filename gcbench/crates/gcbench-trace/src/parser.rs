//! gctrace Parser
//!
//! Turns collector trace output into [`GcCycle`] records. A cycle line looks
//! like:
//!
//! ```text
//! gc 1 @0.012s 0%: 0.011+0.39+0.0061 ms clock, 0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P
//! ```
//!
//! The header (`gc N @Ts U%: `) is matched at the start of a line; lines
//! without it belong to other program output and are skipped. The detail
//! section is split on commas and every part must match one of the part
//! grammars below, in any order:
//!
//! | Part | Grammar |
//! |------|---------|
//! | clock | `[+0-9.]+ ms clock` |
//! | cpu | `[+/0-9.]+ ms cpu` |
//! | heap | `[0-9.]+->[0-9.]+->[0-9.]+ MB` |
//! | goal | `[0-9.]+ MB goal` |
//! | procs | `[0-9]+ P` |
//!
//! Any other part fails the whole parse.

use crate::cycle::{GcCycle, Phases, TraceFormat, MB};
use crate::error::{PhaseKind, Result, TraceError};
use crate::trace::Trace;
use std::time::Duration;

const FORCED_SUFFIX: &str = " (forced)";

/// Parse every cycle line of `text`
///
/// Non-cycle lines are ignored. One malformed cycle line fails the whole
/// input.
pub fn parse_trace(text: &str) -> Result<Trace> {
    let mut parser = TraceParser::new();
    for line in text.lines() {
        parser.push_line(line)?;
    }
    Ok(parser.finish())
}

/// Incremental parser fed one line at a time
///
/// Keeps the running line number so errors point at the offending input
/// line.
#[derive(Debug, Default)]
pub struct TraceParser {
    line: usize,
    cycles: Vec<GcCycle>,
}

impl TraceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of output
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        match parse_cycle_line(line, self.line)? {
            Some(cycle) => self.cycles.push(cycle),
            None => log::trace!("line {}: not a gctrace line", self.line),
        }
        Ok(())
    }

    /// Finish parsing and return the trace in encounter order
    pub fn finish(self) -> Trace {
        let forced = self.cycles.iter().filter(|c| c.forced).count();
        log::debug!(
            "parsed {} gc cycles ({} forced) from {} lines",
            self.cycles.len(),
            forced,
            self.line
        );
        Trace::from(self.cycles)
    }
}

/// Report whether `line` starts with a gctrace cycle header
pub fn is_cycle_line(line: &str) -> bool {
    split_header(line).is_some()
}

/// Parse one line
///
/// Returns `Ok(None)` if the line is not a cycle line. `line_no` is only
/// used for error reporting.
pub fn parse_cycle_line(line: &str, line_no: usize) -> Result<Option<GcCycle>> {
    let Some(header) = split_header(line) else {
        return Ok(None);
    };

    let invalid = |text: &str| TraceError::InvalidNumber {
        line: line_no,
        text: text.to_string(),
    };

    let n = header.n.parse::<u64>().map_err(|_| invalid(header.n))?;
    let start = parse_scaled(header.secs, 9).ok_or_else(|| invalid(header.secs))?;
    let util = header
        .util
        .parse::<u32>()
        .ok()
        .filter(|&pct| pct <= 100)
        .ok_or_else(|| invalid(header.util))?;

    let mut cycle = GcCycle::new(n);
    cycle.start = Duration::from_nanos(start);
    cycle.end = cycle.start;
    cycle.util = f64::from(util) / 100.0;

    let mut detail = header.detail;
    if let Some(stripped) = detail.strip_suffix(FORCED_SUFFIX) {
        cycle.forced = true;
        detail = stripped;
    }

    let mut format = None;
    for part in detail.split(',') {
        let part = part.trim();
        match classify(part) {
            Some(Part::Clock(list)) => {
                let phases = parse_phase_list(list, line_no)?;
                let (f, phases) =
                    Phases::from_list(&phases).ok_or(TraceError::PhaseArity {
                        line: line_no,
                        kind: PhaseKind::Clock,
                        count: phases.len(),
                    })?;
                cycle.end = cycle.start + phases.total();
                cycle.set_clock(phases);
                format = Some(f);
            }
            Some(Part::Cpu(list)) => {
                let phases = parse_cpu_list(list, line_no, &mut cycle)?;
                let (f, phases) =
                    Phases::from_list(&phases).ok_or(TraceError::PhaseArity {
                        line: line_no,
                        kind: PhaseKind::Cpu,
                        count: phases.len(),
                    })?;
                cycle.set_cpu(phases);
                if format.is_none() {
                    format = Some(f);
                }
            }
            Some(Part::Heap(trigger, actual, marked)) => {
                cycle.heap_trigger = mb_to_bytes(trigger).ok_or_else(|| invalid(trigger))?;
                cycle.heap_actual = mb_to_bytes(actual).ok_or_else(|| invalid(actual))?;
                cycle.heap_marked = mb_to_bytes(marked).ok_or_else(|| invalid(marked))?;
            }
            Some(Part::Goal(goal)) => {
                cycle.heap_goal = mb_to_bytes(goal).ok_or_else(|| invalid(goal))?;
            }
            Some(Part::Procs(procs)) => {
                cycle.procs = procs.parse::<u32>().map_err(|_| invalid(procs))?;
            }
            None => {
                return Err(TraceError::UnknownPart {
                    line: line_no,
                    part: part.to_string(),
                })
            }
        }
    }
    cycle.format = format.unwrap_or(TraceFormat::ThreePhase);

    Ok(Some(cycle))
}

struct Header<'a> {
    n: &'a str,
    secs: &'a str,
    util: &'a str,
    detail: &'a str,
}

/// Match `gc #?[0-9]+ @[0-9.]+s [0-9]+%: ` at the start of the line
fn split_header(line: &str) -> Option<Header<'_>> {
    let rest = line.strip_prefix("gc ")?;
    let rest = rest.strip_prefix('#').unwrap_or(rest);
    let (n, rest) = take_while(rest, |c| c.is_ascii_digit())?;
    let rest = rest.strip_prefix(" @")?;
    let (secs, rest) = take_while(rest, |c| c.is_ascii_digit() || c == '.')?;
    let rest = rest.strip_prefix("s ")?;
    let (util, rest) = take_while(rest, |c| c.is_ascii_digit())?;
    let detail = rest.strip_prefix("%: ")?;
    Some(Header {
        n,
        secs,
        util,
        detail,
    })
}

/// Split off the longest non-empty prefix whose chars satisfy `pred`
fn take_while(s: &str, pred: impl Fn(char) -> bool) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

enum Part<'a> {
    Clock(&'a str),
    Cpu(&'a str),
    Heap(&'a str, &'a str, &'a str),
    Goal(&'a str),
    Procs(&'a str),
}

fn classify(part: &str) -> Option<Part<'_>> {
    if let Some(v) = part.strip_suffix(" ms clock") {
        return only(v, "+0123456789.").map(Part::Clock);
    }
    if let Some(v) = part.strip_suffix(" ms cpu") {
        return only(v, "+/0123456789.").map(Part::Cpu);
    }
    if let Some(v) = part.strip_suffix(" MB goal") {
        return only(v, "0123456789.").map(Part::Goal);
    }
    if let Some(v) = part.strip_suffix(" MB") {
        let mut it = v.split("->");
        let (a, b, c) = (it.next()?, it.next()?, it.next()?);
        if it.next().is_some() {
            return None;
        }
        let digits = "0123456789.";
        return Some(Part::Heap(only(a, digits)?, only(b, digits)?, only(c, digits)?));
    }
    if let Some(v) = part.strip_suffix(" P") {
        return only(v, "0123456789").map(Part::Procs);
    }
    None
}

/// `Some(s)` if `s` is non-empty and every char is in `set`
fn only<'a>(s: &'a str, set: &str) -> Option<&'a str> {
    (!s.is_empty() && s.chars().all(|c| set.contains(c))).then_some(s)
}

fn parse_phase_list(list: &str, line_no: usize) -> Result<Vec<Duration>> {
    list.split('+').map(|p| ms_to_dur(p, line_no)).collect()
}

/// Parse a cpu list, capturing the assist/background/idle breakdown
///
/// A phase written `a/b/c` contributes `a + b + c` to the phase list.
fn parse_cpu_list(list: &str, line_no: usize, cycle: &mut GcCycle) -> Result<Vec<Duration>> {
    let mut phases = Vec::with_capacity(5);
    for phase in list.split('+') {
        let sub = phase
            .split('/')
            .map(|p| ms_to_dur(p, line_no))
            .collect::<Result<Vec<_>>>()?;
        match sub.as_slice() {
            [single] => phases.push(*single),
            [assist, background, idle] => {
                cycle.cpu_assist = *assist;
                cycle.cpu_background = *background;
                cycle.cpu_idle = *idle;
                phases.push(*assist + *background + *idle);
            }
            _ => {
                return Err(TraceError::CpuBreakdown {
                    line: line_no,
                    part: phase.to_string(),
                })
            }
        }
    }
    Ok(phases)
}

fn ms_to_dur(text: &str, line_no: usize) -> Result<Duration> {
    parse_scaled(text, 6)
        .map(Duration::from_nanos)
        .ok_or_else(|| TraceError::InvalidNumber {
            line: line_no,
            text: text.to_string(),
        })
}

/// Megabytes (2^20) to bytes, rounding down to a whole byte
fn mb_to_bytes(text: &str) -> Option<u64> {
    let micro = parse_scaled(text, 6)?;
    u64::try_from(u128::from(micro) * u128::from(MB) / 1_000_000).ok()
}

/// Parse an unsigned decimal and scale it by `10^digits` exactly
///
/// `"0.0061"` with 6 digits is `6100`. Fraction digits past `digits` are
/// truncated. Returns `None` for malformed text or on overflow.
pub(crate) fn parse_scaled(text: &str, digits: u32) -> Option<u64> {
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (text, ""),
    };
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let scale = 10u64.checked_pow(digits)?;
    let int = if int.is_empty() { 0 } else { int.parse::<u64>().ok()? };
    let mut value = int.checked_mul(scale)?;

    let mut place = scale;
    for c in frac.chars().take(digits as usize) {
        place /= 10;
        value = value.checked_add(u64::from(c as u8 - b'0') * place)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "gc 1 @0.012s 0%: 0.011+0.39+0.0061 ms clock, \
        0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P";

    #[test]
    fn test_parse_scaled() {
        assert_eq!(parse_scaled("0.0061", 6), Some(6_100));
        assert_eq!(parse_scaled("12", 6), Some(12_000_000));
        assert_eq!(parse_scaled(".5", 3), Some(500));
        assert_eq!(parse_scaled("3.", 3), Some(3_000));
        assert_eq!(parse_scaled("0.1234567", 6), Some(123_456));
        assert_eq!(parse_scaled(".", 6), None);
        assert_eq!(parse_scaled("1.2.3", 6), None);
        assert_eq!(parse_scaled("", 6), None);
        assert_eq!(parse_scaled("99999999999999999999", 6), None);
    }

    #[test]
    fn test_header_variants() {
        assert!(is_cycle_line(SAMPLE));
        assert!(is_cycle_line("gc #12 @1.5s 3%: 4 P"));
        assert!(!is_cycle_line(" gc 1 @0.012s 0%: 4 P"));
        assert!(!is_cycle_line("gc x @0.012s 0%: 4 P"));
        assert!(!is_cycle_line("testing: warning: no tests to run"));
        assert!(!is_cycle_line("gc 1 @0.012s 0%:"));
    }

    #[test]
    fn test_parse_three_phase_line() {
        let cycle = parse_cycle_line(SAMPLE, 1).unwrap().unwrap();
        assert_eq!(cycle.n, 1);
        assert_eq!(cycle.format, TraceFormat::ThreePhase);
        assert_eq!(cycle.start, Duration::from_millis(12));
        assert_eq!(cycle.util, 0.0);
        assert!(!cycle.forced);
        assert_eq!(cycle.clock_sweep_term, Duration::from_nanos(11_000));
        assert_eq!(cycle.clock_mark, Duration::from_nanos(390_000));
        assert_eq!(cycle.clock_mark_term, Duration::from_nanos(6_100));
        assert_eq!(cycle.clock_root_scan, Duration::ZERO);
        assert_eq!(cycle.clock_sync, Duration::ZERO);
        assert_eq!(
            cycle.end,
            Duration::from_millis(12) + Duration::from_nanos(11_000 + 390_000 + 6_100)
        );
        assert_eq!(cycle.cpu_mark, Duration::from_nanos(380_000));
        assert_eq!(cycle.cpu_assist, Duration::from_nanos(100_000));
        assert_eq!(cycle.cpu_background, Duration::from_nanos(280_000));
        assert_eq!(cycle.cpu_idle, Duration::ZERO);
        assert_eq!(cycle.heap_trigger, 4 * MB);
        assert_eq!(cycle.heap_actual, 4 * MB);
        assert_eq!(cycle.heap_marked, 3 * MB);
        assert_eq!(cycle.heap_goal, 5 * MB);
        assert_eq!(cycle.procs, 4);
    }

    #[test]
    fn test_parse_five_phase_line() {
        let line = "gc 7 @2.500s 4%: 0.5+1.0+0.25+3.0+0.75 ms clock, \
            1.0+2.0+0.5+0.5/4.0/1.5+1.5 ms cpu, 20->22->10 MB, 24 MB goal, 8 P";
        let cycle = parse_cycle_line(line, 1).unwrap().unwrap();
        assert_eq!(cycle.format, TraceFormat::FivePhase);
        assert_eq!(cycle.util, 0.04);
        assert_eq!(cycle.clock_root_scan, Duration::from_micros(1_000));
        assert_eq!(cycle.clock_sync, Duration::from_micros(250));
        assert_eq!(cycle.clock_mark, Duration::from_micros(3_000));
        assert_eq!(cycle.cpu_root_scan, Duration::from_micros(2_000));
        assert_eq!(cycle.cpu_mark, Duration::from_micros(6_000));
        assert_eq!(cycle.end - cycle.start, Duration::from_micros(5_500));
    }

    #[test]
    fn test_util_above_hundred_is_error() {
        let line = "gc 1 @0.1s 150%: 0.1+0.2+0.3 ms clock, 4 P";
        let err = parse_cycle_line(line, 3).unwrap_err();
        assert_eq!(
            err,
            TraceError::InvalidNumber {
                line: 3,
                text: "150".to_string()
            }
        );

        let full = "gc 1 @0.1s 100%: 0.1+0.2+0.3 ms clock, 4 P";
        let cycle = parse_cycle_line(full, 1).unwrap().unwrap();
        assert_eq!(cycle.util, 1.0);
    }

    #[test]
    fn test_forced_suffix_stripped() {
        let line = format!("{} (forced)", SAMPLE);
        let cycle = parse_cycle_line(&line, 1).unwrap().unwrap();
        assert!(cycle.forced);
        assert_eq!(cycle.procs, 4);
    }

    #[test]
    fn test_bad_arity_is_error() {
        let line = "gc 1 @0.1s 0%: 0.1+0.2 ms clock, 4 P";
        let err = parse_cycle_line(line, 9).unwrap_err();
        assert_eq!(
            err,
            TraceError::PhaseArity {
                line: 9,
                kind: PhaseKind::Clock,
                count: 2
            }
        );
    }

    #[test]
    fn test_unknown_part_is_error() {
        let line = "gc 1 @0.1s 0%: 0.1+0.2+0.3 ms clock, 12 widgets";
        assert!(matches!(
            parse_cycle_line(line, 1),
            Err(TraceError::UnknownPart { part, .. }) if part == "12 widgets"
        ));
    }

    #[test]
    fn test_partial_cpu_breakdown_is_error() {
        let line = "gc 1 @0.1s 0%: 0.1+0.2/0.3+0.4 ms cpu";
        assert!(matches!(
            parse_cycle_line(line, 1),
            Err(TraceError::CpuBreakdown { .. })
        ));
    }

    #[test]
    fn test_fractional_megabytes() {
        assert_eq!(mb_to_bytes("0.5"), Some(MB / 2));
        assert_eq!(mb_to_bytes("1024"), Some(1024 * MB));
    }
}
