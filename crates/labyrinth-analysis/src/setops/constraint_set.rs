//! A box: one range per dimension.

use labyrinth_core::types::collections::SmallVec5;

use crate::dimensions::IntervalSet;

/// An assignment of a range to each dimension, in Universe order.
///
/// A box with any empty dimension matches no traffic. Boxes are only
/// compared with boxes from the same Universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintSet {
    ranges: SmallVec5<IntervalSet>,
}

impl ConstraintSet {
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = IntervalSet>,
    {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn dimension_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn range(&self, dimension: usize) -> &IntervalSet {
        &self.ranges[dimension]
    }

    pub fn ranges(&self) -> &[IntervalSet] {
        &self.ranges
    }

    /// Copy of `self` with the range of `dimension` replaced.
    pub fn with_range(&self, dimension: usize, range: IntervalSet) -> Self {
        let mut next = self.clone();
        next.ranges[dimension] = range;
        next
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.iter().any(IntervalSet::is_empty)
    }

    /// Per-dimension intersection. The result may be empty.
    pub fn intersect(&self, other: &ConstraintSet) -> ConstraintSet {
        Self::from_ranges(
            self.ranges
                .iter()
                .zip(other.ranges.iter())
                .map(|(a, b)| a.intersect(b)),
        )
    }

    /// Whether every point of `other` lies in `self`.
    pub fn contains(&self, other: &ConstraintSet) -> bool {
        other.is_empty()
            || self
                .ranges
                .iter()
                .zip(other.ranges.iter())
                .all(|(a, b)| a.is_superset_of(b))
    }

    pub fn is_disjoint_from(&self, other: &ConstraintSet) -> bool {
        self.intersect(other).is_empty()
    }

    /// `self` minus `other` as pairwise-disjoint boxes.
    ///
    /// Piece `d` keeps the overlap in dimensions before `d`, the residual
    /// `self[d] \ other[d]` in dimension `d`, and `self` after `d`.
    pub fn subtract(&self, other: &ConstraintSet) -> Vec<ConstraintSet> {
        if self.is_empty() {
            return Vec::new();
        }
        let overlap = self.intersect(other);
        if overlap.is_empty() {
            return vec![self.clone()];
        }

        let mut pieces = Vec::new();
        let mut prefix = self.clone();
        for d in 0..self.ranges.len() {
            let residual = self.ranges[d].subtract(&other.ranges[d]);
            if !residual.is_empty() {
                pieces.push(prefix.with_range(d, residual));
            }
            prefix.ranges[d] = overlap.ranges[d].clone();
        }
        pieces
    }

    /// The single dimension in which `self` and `other` differ, if exactly one does.
    pub fn sole_difference(&self, other: &ConstraintSet) -> Option<usize> {
        let mut differing = self
            .ranges
            .iter()
            .zip(other.ranges.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(d, _)| d);
        match (differing.next(), differing.next()) {
            (Some(d), None) => Some(d),
            _ => None,
        }
    }
}
