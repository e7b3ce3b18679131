//! Universe-aware box operations: intersection, ordered subtraction
//! (rule shadowing) and union simplification (converging paths).

use std::sync::Arc;

use labyrinth_core::types::collections::SmallVec5;

use super::{ConstraintSet, Disjunction};
use crate::universe::Universe;

/// Stateless set operations over boxes of one Universe.
///
/// Cloning is cheap; the Universe is shared read-only.
#[derive(Debug, Clone)]
pub struct Simplifier {
    universe: Arc<Universe>,
}

impl Simplifier {
    pub fn new(universe: Arc<Universe>) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn shared_universe(&self) -> Arc<Universe> {
        Arc::clone(&self.universe)
    }

    pub fn whole(&self) -> ConstraintSet {
        self.universe.whole()
    }

    /// Path composition. An empty result means no traffic matches.
    pub fn intersect(&self, a: &ConstraintSet, b: &ConstraintSet) -> ConstraintSet {
        a.intersect(b)
    }

    /// The residual of `target` after removing everything claimed by `prior`.
    pub fn subtract_all(&self, target: &ConstraintSet, prior: &[ConstraintSet]) -> Disjunction {
        let mut residual: Vec<ConstraintSet> = if target.is_empty() {
            Vec::new()
        } else {
            vec![target.clone()]
        };
        for claimed in prior {
            if residual.is_empty() {
                break;
            }
            residual = residual
                .iter()
                .flat_map(|piece| piece.subtract(claimed))
                .collect();
        }
        self.union_simplify(residual)
    }

    /// First-match precedence over an ordered rule list: entry `i` is rule
    /// `i` minus every earlier rule.
    pub fn effective(&self, rules: &[ConstraintSet]) -> Vec<Disjunction> {
        rules
            .iter()
            .enumerate()
            .map(|(i, rule)| self.subtract_all(rule, &rules[..i]))
            .collect()
    }

    /// Merge boxes into a smaller equivalent list.
    ///
    /// Repeatedly folds a pair together when one contains the other, or when
    /// they differ in exactly one dimension (that dimension's ranges are
    /// unioned, e.g. sibling prefixes collapse into their parent). Boxes that
    /// differ in two or more dimensions stay separate. The survivor of a merge
    /// keeps the earlier position.
    pub fn union_simplify<I>(&self, boxes: I) -> Disjunction
    where
        I: IntoIterator<Item = ConstraintSet>,
    {
        let mut out: Vec<ConstraintSet> = boxes.into_iter().filter(|b| !b.is_empty()).collect();

        'merge: loop {
            for i in 0..out.len() {
                for j in (i + 1)..out.len() {
                    if let Some(merged) = merge_pair(&out[i], &out[j]) {
                        out[i] = merged;
                        out.remove(j);
                        continue 'merge;
                    }
                }
            }
            break;
        }

        out.into_iter().collect()
    }

    pub fn is_whole(&self, set: &ConstraintSet) -> bool {
        set.ranges()
            .iter()
            .zip(self.universe.dimensions())
            .all(|(range, dimension)| range == dimension.whole())
    }

    pub fn is_empty(&self, set: &ConstraintSet) -> bool {
        set.is_empty()
    }

    /// Indices of the dimensions that constrain something, in display order.
    pub fn dimensions_shown(&self, set: &ConstraintSet) -> SmallVec5<usize> {
        set.ranges()
            .iter()
            .zip(self.universe.dimensions())
            .enumerate()
            .filter(|(_, (range, dimension))| *range != dimension.whole())
            .map(|(d, _)| d)
            .collect()
    }

    /// `(display name, rendered range)` for every shown dimension.
    pub fn describe(&self, set: &ConstraintSet) -> Vec<(String, String)> {
        self.dimensions_shown(set)
            .into_iter()
            .map(|d| {
                let dimension = self.universe.dimension(d);
                (dimension.name.clone(), dimension.format(set.range(d)))
            })
            .collect()
    }
}

fn merge_pair(a: &ConstraintSet, b: &ConstraintSet) -> Option<ConstraintSet> {
    if a.contains(b) {
        return Some(a.clone());
    }
    if b.contains(a) {
        return Some(b.clone());
    }
    a.sole_difference(b)
        .map(|d| a.with_range(d, a.range(d).union(b.range(d))))
}
