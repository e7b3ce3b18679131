//! Unions of boxes.

use super::ConstraintSet;

/// A union of non-empty boxes.
///
/// Produced by subtraction and by union simplification; the boxes are kept
/// in first-appearance order so reports are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Disjunction {
    boxes: Vec<ConstraintSet>,
}

impl Disjunction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(set: ConstraintSet) -> Self {
        let mut d = Self::empty();
        d.push(set);
        d
    }

    /// Append a box; empty boxes are dropped.
    pub fn push(&mut self, set: ConstraintSet) {
        if !set.is_empty() {
            self.boxes.push(set);
        }
    }

    pub fn boxes(&self) -> &[ConstraintSet] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintSet> {
        self.boxes.iter()
    }

    pub fn contains_point(&self, point: &[u32]) -> bool {
        self.boxes.iter().any(|b| {
            b.ranges()
                .iter()
                .zip(point.iter())
                .all(|(range, value)| range.contains_value(*value))
        })
    }
}

impl FromIterator<ConstraintSet> for Disjunction {
    fn from_iter<I: IntoIterator<Item = ConstraintSet>>(iter: I) -> Self {
        let mut d = Self::empty();
        for set in iter {
            d.push(set);
        }
        d
    }
}

impl IntoIterator for Disjunction {
    type Item = ConstraintSet;
    type IntoIter = std::vec::IntoIter<ConstraintSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Disjunction {
    type Item = &'a ConstraintSet;
    type IntoIter = std::slice::Iter<'a, ConstraintSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
