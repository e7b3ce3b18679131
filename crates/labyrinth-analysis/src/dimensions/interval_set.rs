//! Canonical sets of inclusive `u32` intervals.

use std::fmt;

use labyrinth_core::types::collections::SmallVec2;
use smallvec::smallvec;

/// An inclusive interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "inverted interval {start}..={end}");
        Self { start, end }
    }

    pub fn single(value: u32) -> Self {
        Self::new(value, value)
    }

    /// Number of values covered. `u64` because a full address range has 2^32.
    pub fn size(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A set of values stored as sorted, disjoint, non-adjacent intervals.
///
/// The representation is canonical: two sets covering the same values have
/// identical interval lists, so derived `Eq` and `Hash` are set equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IntervalSet {
    intervals: SmallVec2<Interval>,
}

impl IntervalSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_interval(interval: Interval) -> Self {
        Self {
            intervals: smallvec![interval],
        }
    }

    pub fn single(value: u32) -> Self {
        Self::from_interval(Interval::single(value))
    }

    /// Build from arbitrary (unsorted, overlapping) intervals.
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut raw: SmallVec2<Interval> = intervals.into_iter().collect();
        raw.sort_unstable();
        Self {
            intervals: coalesce(raw),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total number of values covered.
    pub fn size(&self) -> u64 {
        self.intervals.iter().map(Interval::size).sum()
    }

    pub fn contains_value(&self, value: u32) -> bool {
        self.intervals
            .iter()
            .any(|iv| iv.start <= value && value <= iv.end)
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_intervals(self.intervals.iter().chain(other.intervals.iter()).copied())
    }

    pub fn intersect(&self, other: &IntervalSet) -> IntervalSet {
        let (a, b) = (&self.intervals, &other.intervals);
        let mut out = SmallVec2::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let lo = a[i].start.max(b[j].start);
            let hi = a[i].end.min(b[j].end);
            if lo <= hi {
                out.push(Interval::new(lo, hi));
            }
            if a[i].end < b[j].end {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntervalSet { intervals: out }
    }

    /// Values in `self` that are not in `other`.
    pub fn subtract(&self, other: &IntervalSet) -> IntervalSet {
        if other.is_empty() {
            return self.clone();
        }
        let mut out = SmallVec2::new();
        for iv in &self.intervals {
            let end = u64::from(iv.end);
            let mut start = u64::from(iv.start);
            for cut in &other.intervals {
                if u64::from(cut.end) < start {
                    continue;
                }
                if u64::from(cut.start) > end {
                    break;
                }
                if u64::from(cut.start) > start {
                    out.push(Interval::new(start as u32, cut.start - 1));
                }
                start = u64::from(cut.end) + 1;
                if start > end {
                    break;
                }
            }
            if start <= end {
                out.push(Interval::new(start as u32, end as u32));
            }
        }
        IntervalSet { intervals: out }
    }

    /// Values of `whole` that are not in `self`.
    pub fn complement(&self, whole: &IntervalSet) -> IntervalSet {
        whole.subtract(self)
    }

    pub fn is_superset_of(&self, other: &IntervalSet) -> bool {
        other.subtract(self).is_empty()
    }

    pub fn is_disjoint_from(&self, other: &IntervalSet) -> bool {
        self.intersect(other).is_empty()
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

/// Merge overlapping and adjacent intervals of a sorted list.
fn coalesce(sorted: SmallVec2<Interval>) -> SmallVec2<Interval> {
    let mut out: SmallVec2<Interval> = SmallVec2::new();
    for iv in sorted {
        match out.last_mut() {
            Some(last) if u64::from(iv.start) <= u64::from(last.end) + 1 => {
                last.end = last.end.max(iv.end);
            }
            _ => out.push(iv),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(u32, u32)]) -> IntervalSet {
        pairs.iter().map(|&(s, e)| Interval::new(s, e)).collect()
    }

    #[test]
    fn test_from_intervals_is_canonical() {
        let a = set(&[(5, 9), (1, 3), (4, 4), (20, 30), (25, 40)]);
        assert_eq!(a.intervals(), &[Interval::new(1, 9), Interval::new(20, 40)]);
        assert_eq!(a, set(&[(1, 9), (20, 40)]));
    }

    #[test]
    fn test_union_merges_adjacent() {
        let a = set(&[(0, 9)]);
        let b = set(&[(10, 19)]);
        assert_eq!(a.union(&b), set(&[(0, 19)]));
    }

    #[test]
    fn test_union_at_domain_edge() {
        let a = set(&[(0, u32::MAX - 1)]);
        let b = set(&[(u32::MAX, u32::MAX)]);
        let u = a.union(&b);
        assert_eq!(u.intervals(), &[Interval::new(0, u32::MAX)]);
        assert_eq!(u.size(), 1u64 << 32);
    }

    #[test]
    fn test_intersect() {
        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        assert_eq!(a.intersect(&b), set(&[(5, 10), (20, 25)]));
        assert!(a.intersect(&set(&[(11, 19)])).is_empty());
    }

    #[test]
    fn test_subtract_splits() {
        let a = set(&[(0, 100)]);
        let b = set(&[(10, 20), (50, 50)]);
        assert_eq!(a.subtract(&b), set(&[(0, 9), (21, 49), (51, 100)]));
        assert!(a.subtract(&a).is_empty());
        assert_eq!(a.subtract(&IntervalSet::empty()), a);
    }

    #[test]
    fn test_subtract_full_domain() {
        let whole = set(&[(0, u32::MAX)]);
        let hole = set(&[(u32::MAX, u32::MAX)]);
        assert_eq!(whole.subtract(&hole), set(&[(0, u32::MAX - 1)]));
        let hole = set(&[(0, 0)]);
        assert_eq!(whole.subtract(&hole), set(&[(1, u32::MAX)]));
    }

    #[test]
    fn test_complement_round_trip() {
        let whole = set(&[(0, 65_535)]);
        let a = set(&[(80, 80), (443, 443)]);
        let c = a.complement(&whole);
        assert_eq!(c, set(&[(0, 79), (81, 442), (444, 65_535)]));
        assert_eq!(c.complement(&whole), a);
    }

    #[test]
    fn test_superset_and_disjoint() {
        let a = set(&[(0, 100)]);
        assert!(a.is_superset_of(&set(&[(3, 4), (90, 100)])));
        assert!(!a.is_superset_of(&set(&[(90, 101)])));
        assert!(a.is_disjoint_from(&set(&[(101, 200)])));
        assert!(a.is_superset_of(&IntervalSet::empty()));
    }
}
