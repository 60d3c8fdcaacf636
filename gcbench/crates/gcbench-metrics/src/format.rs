//! Number formatting and line layout for reports

/// Format `v` with at least three significant figures
///
/// Uses the fewest decimals that show three significant digits of the
/// integer-scaled value. Zero, infinities and NaN are printed without
/// decimals.
pub fn sigfigs(v: f64) -> String {
    let mut prec = 0;
    let mut m = v;
    loop {
        if m >= 99.5 || m <= -99.5 || m * 10.0 == m || m.is_nan() {
            return format!("{:.*}", prec, v);
        }
        m *= 10.0;
        prec += 1;
    }
}

/// Separator placed before each value of a report line
///
/// The line stays one logical line, but on a capable terminal each value is
/// pushed onto its own visual row by a run of tabs.
pub fn alignment(term: Option<&str>, tabs: usize) -> String {
    match term {
        Some("dumb") => "\t".to_string(),
        _ => format!("{} ", "\t".repeat(tabs)),
    }
}
