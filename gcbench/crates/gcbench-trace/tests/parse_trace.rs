//! gctrace Parsing Tests
//!
//! End-to-end parses of realistic collector output: mixed formats,
//! interleaved program output, forced cycles and malformed input.

use gcbench_trace::{parse_trace, CycleField, TraceError, TraceFormat, MB};
use std::time::Duration;

/// Output of a short run on the three-phase format, with program chatter
const THREE_PHASE_RUN: &str = "\
starting benchmark
gc 1 @0.012s 0%: 0.011+0.39+0.0061 ms clock, 0.011+0.10/0.28/0+0.0061 ms cpu, 4->4->3 MB, 5 MB goal, 4 P
gc 2 @0.031s 1%: 0.008+1.2+0.010 ms clock, 0.032+0.40/1.1/0.20+0.040 ms cpu, 4->5->3 MB, 6 MB goal, 4 P
gc 3 @0.050s 1%: 0.010+0.80+0.012 ms clock, 0.040+0.35/0.90/0.10+0.048 ms cpu, 5->5->1 MB, 6 MB goal, 4 P (forced)
metric 1234 allocs/op
gc 4 @0.075s 2%: 0.009+0.95+0.011 ms clock, 0.036+0.30/1.0/0.05+0.044 ms cpu, 4->6->2 MB, 7 MB goal, 4 P
";

#[test]
fn test_parse_mixed_output() {
    let trace = parse_trace(THREE_PHASE_RUN).unwrap();

    assert_eq!(trace.len(), 4);
    let ns: Vec<u64> = trace.iter().map(|c| c.n).collect();
    assert_eq!(ns, vec![1, 2, 3, 4]);
    assert!(trace.iter().all(|c| c.format == TraceFormat::ThreePhase));
    assert_eq!(trace.forced_count(), 1);
    assert!(trace[2].forced);
    assert_eq!(trace[2].procs, 4);
}

#[test]
fn test_first_cycle_fields() {
    let trace = parse_trace(THREE_PHASE_RUN).unwrap();
    let c = &trace[0];

    assert_eq!(c.n, 1);
    assert_eq!(c.start, Duration::from_millis(12));
    assert_eq!(c.util, 0.0);
    assert!(!c.forced);
    assert_eq!(c.heap_trigger, 4 * MB);
    assert_eq!(c.heap_actual, 4 * MB);
    assert_eq!(c.heap_marked, 3 * MB);
    assert_eq!(c.heap_goal, 5 * MB);
    assert_eq!(c.procs, 4);
    assert_eq!(c.cpu_assist, Duration::from_micros(100));
    assert_eq!(c.cpu_background, Duration::from_micros(280));
    assert_eq!(c.cpu_idle, Duration::ZERO);
}

#[test]
fn test_end_is_start_plus_clock_phases() {
    let trace = parse_trace(THREE_PHASE_RUN).unwrap();
    for c in &trace {
        assert_eq!(c.end, c.start + c.clock().total());
        assert_eq!(c.cpu().mark, c.cpu_mark);
    }
}

#[test]
fn test_phase_sums_are_exact() {
    // 0.0061 ms is not representable in binary floating point; a thousand
    // of them must still add up to exactly 6.1 ms.
    let line = "gc 1 @0.1s 0%: 0.0061+0.0061+0.0061 ms clock, 4 P\n";
    let trace = parse_trace(&line.repeat(1000)).unwrap();
    let total: Duration = trace
        .extract(CycleField::ClockMarkTerm)
        .as_durations()
        .unwrap()
        .iter()
        .sum();
    assert_eq!(total, Duration::from_micros(6_100));
}

#[test]
fn test_five_phase_format() {
    let text = "gc 12 @3.456s 7%: 0.10+1.5+0.20+4.0+0.30 ms clock, \
        0.40+3.0+0.10+1.0/8.0/2.0+1.2 ms cpu, 40->44->20 MB, 42 MB goal, 8 P";
    let trace = parse_trace(text).unwrap();
    let c = &trace[0];

    assert_eq!(c.format, TraceFormat::FivePhase);
    assert_eq!(c.clock_root_scan, Duration::from_micros(1_500));
    assert_eq!(c.clock_sync, Duration::from_micros(200));
    assert_eq!(c.cpu_mark, Duration::from_micros(11_000));
    assert_eq!(c.cpu_assist, Duration::from_micros(1_000));
    assert_eq!(c.start, Duration::from_millis(3_456));
    assert!((c.util - 0.07).abs() < 1e-12);
}

#[test]
fn test_parts_in_any_order() {
    let text = "gc 1 @0.5s 2%: 8 P, 10 MB goal, 9->9->4 MB, \
        0.1+0.2/0.3/0.4+0.5 ms cpu, 0.1+2.0+0.3 ms clock";
    let c = &parse_trace(text).unwrap()[0];
    assert_eq!(c.procs, 8);
    assert_eq!(c.heap_goal, 10 * MB);
    assert_eq!(c.clock_mark, Duration::from_millis(2));
    assert_eq!(c.cpu_idle, Duration::from_micros(400));
}

#[test]
fn test_no_tests_warning_is_ignored() {
    let trace = parse_trace("testing: warning: no tests to run\n").unwrap();
    assert!(trace.is_empty());
}

#[test]
fn test_empty_input() {
    assert!(parse_trace("").unwrap().is_empty());
}

#[test]
fn test_one_bad_line_fails_batch() {
    let text = format!(
        "{}gc 5 @0.1s 2%: 0.1+0.2+0.3+0.4 ms clock, 4 P\n",
        THREE_PHASE_RUN
    );
    let err = parse_trace(&text).unwrap_err();
    assert!(matches!(err, TraceError::PhaseArity { count: 4, .. }));
    assert_eq!(err.line(), 7);
}

#[test]
fn test_unknown_part_fails_batch() {
    let text = "gc 1 @0.1s 2%: 0.1+0.2+0.3 ms clock, 4 MB stack, 4 P";
    let err = parse_trace(text).unwrap_err();
    assert_eq!(
        err,
        TraceError::UnknownPart {
            line: 1,
            part: "4 MB stack".to_string()
        }
    );
}

#[test]
fn test_malformed_number_fails() {
    let text = "gc 1 @0.1s 2%: 0.1+0..2+0.3 ms clock, 4 P";
    assert!(matches!(
        parse_trace(text),
        Err(TraceError::InvalidNumber { .. })
    ));
}

#[test]
fn test_serialize_cycle_as_nanos() {
    let trace = parse_trace(THREE_PHASE_RUN).unwrap();
    let json = serde_json::to_value(&trace).unwrap();
    assert_eq!(json[0]["start"], 12_000_000);
    assert_eq!(json[0]["format"], "three_phase");
    assert_eq!(json[2]["forced"], true);
}
