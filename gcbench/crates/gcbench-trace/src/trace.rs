//! Trace - Ordered Cycle History of One Run

use crate::cycle::GcCycle;
use crate::field::{Column, CycleField};
use serde::Serialize;
use std::ops::Index;

/// Cycles of one execution, in the order their lines were encountered
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    cycles: Vec<GcCycle>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cycle at the end of the trace
    pub fn push(&mut self, cycle: GcCycle) {
        self.cycles.push(cycle);
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GcCycle> {
        self.cycles.iter()
    }

    pub fn as_slice(&self) -> &[GcCycle] {
        &self.cycles
    }

    pub fn first(&self) -> Option<&GcCycle> {
        self.cycles.first()
    }

    pub fn last(&self) -> Option<&GcCycle> {
        self.cycles.last()
    }

    /// The trace minus forced cycles, relative order preserved
    pub fn without_forced(&self) -> Trace {
        self.iter().filter(|c| !c.forced).cloned().collect()
    }

    /// Number of forced cycles
    pub fn forced_count(&self) -> usize {
        self.iter().filter(|c| c.forced).count()
    }

    /// Project one field across every cycle
    pub fn extract(&self, field: CycleField) -> Column {
        field.project(&self.cycles)
    }

    /// Project a field given by name
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a field of [`GcCycle`]. Names requested by
    /// code are fixed at compile time, so an unknown one is a bug; use
    /// [`CycleField::lookup`] for names that come from users.
    pub fn extract_named(&self, name: &str) -> Column {
        match CycleField::lookup(name) {
            Ok(field) => self.extract(field),
            Err(err) => panic!("{}", err),
        }
    }
}

impl From<Vec<GcCycle>> for Trace {
    fn from(cycles: Vec<GcCycle>) -> Self {
        Self { cycles }
    }
}

impl FromIterator<GcCycle> for Trace {
    fn from_iter<I: IntoIterator<Item = GcCycle>>(iter: I) -> Self {
        Self {
            cycles: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Trace {
    type Item = GcCycle;
    type IntoIter = std::vec::IntoIter<GcCycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a GcCycle;
    type IntoIter = std::slice::Iter<'a, GcCycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}

impl Index<usize> for Trace {
    type Output = GcCycle;

    fn index(&self, index: usize) -> &GcCycle {
        &self.cycles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace_with_forced(total: u64, forced: &[u64]) -> Trace {
        (1..=total)
            .map(|n| GcCycle {
                forced: forced.contains(&n),
                ..GcCycle::new(n)
            })
            .collect()
    }

    #[test]
    fn test_without_forced_keeps_order() {
        let trace = trace_with_forced(10, &[3, 7]);
        let organic = trace.without_forced();

        assert_eq!(organic.len(), 8);
        assert_eq!(trace.forced_count(), 2);
        let ns: Vec<u64> = organic.iter().map(|c| c.n).collect();
        assert_eq!(ns, vec![1, 2, 4, 5, 6, 8, 9, 10]);
    }

    #[test]
    fn test_without_forced_empty() {
        let trace = trace_with_forced(3, &[1, 2, 3]);
        assert!(trace.without_forced().is_empty());
    }

    #[test]
    #[should_panic(expected = "unknown cycle field: clock_bogus")]
    fn test_extract_named_unknown_panics() {
        trace_with_forced(1, &[]).extract_named("clock_bogus");
    }
}
