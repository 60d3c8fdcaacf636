//! Human-readable durations (`250ns`, `12.5µs`, `1.5ms`, `2s`)

use std::fmt;
use std::time::Duration;

/// Display adapter picking the largest unit that keeps the integer part
/// non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtDuration(pub Duration);

impl fmt::Display for FmtDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.0.as_nanos();
        let text = if ns == 0 {
            "0s".to_string()
        } else if ns < 1_000 {
            format!("{}ns", ns)
        } else if ns < 1_000_000 {
            format!("{}µs", decimal(ns, 1_000))
        } else if ns < 1_000_000_000 {
            format!("{}ms", decimal(ns, 1_000_000))
        } else {
            format!("{}s", decimal(ns, 1_000_000_000))
        };
        f.pad(&text)
    }
}

/// `value / unit` as an exact decimal without trailing zeros
fn decimal(value: u128, unit: u128) -> String {
    let int = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return int.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", int, digits.trim_end_matches('0'))
}
