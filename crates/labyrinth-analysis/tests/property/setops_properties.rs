use std::sync::Arc;

use labyrinth_analysis::{ConstraintSet, Disjunction, Interval, IntervalSet, Simplifier, Universe};
use proptest::prelude::*;

const DIMENSIONS: usize = 5;

fn simplifier() -> Simplifier {
    Simplifier::new(Arc::new(Universe::firewall()))
}

/// Ranges clustered near zero so generated boxes overlap often; `None` is whole.
fn range() -> impl Strategy<Value = Option<IntervalSet>> {
    prop_oneof![
        1 => Just(None::<IntervalSet>),
        4 => (0u32..16, 0u32..8)
            .prop_map(|(start, len)| Some(IntervalSet::from_interval(Interval::new(start, start + len)))),
    ]
}

fn boxed() -> impl Strategy<Value = ConstraintSet> {
    prop::collection::vec(range(), DIMENSIONS).prop_map(|ranges| {
        let whole = simplifier().whole();
        ConstraintSet::from_ranges(
            ranges
                .into_iter()
                .enumerate()
                .map(|(d, r)| r.unwrap_or_else(|| whole.range(d).clone())),
        )
    })
}

fn points() -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(prop::collection::vec(0u32..26, DIMENSIONS), 1..40)
}

fn contains(set: &ConstraintSet, point: &[u32]) -> bool {
    Disjunction::single(set.clone()).contains_point(point)
}

proptest! {
    #[test]
    fn subtraction_pieces_are_disjoint(a in boxed(), b in boxed()) {
        let pieces = a.subtract(&b);
        for (i, p) in pieces.iter().enumerate() {
            prop_assert!(a.contains(p));
            prop_assert!(p.is_disjoint_from(&b));
            for q in &pieces[i + 1..] {
                prop_assert!(p.is_disjoint_from(q));
            }
        }
    }

    #[test]
    fn subtract_then_reunion_reconstructs(a in boxed(), b in boxed(), pts in points()) {
        let s = simplifier();
        let residual = s.subtract_all(&a, std::slice::from_ref(&b));
        let rebuilt = s.union_simplify(
            residual.iter().cloned().chain(std::iter::once(a.intersect(&b))),
        );
        for point in &pts {
            prop_assert_eq!(contains(&a, point), rebuilt.contains_point(point));
        }
        if !a.is_empty() {
            prop_assert_eq!(rebuilt.len(), 1);
            prop_assert_eq!(&rebuilt.boxes()[0], &a);
        }
    }

    #[test]
    fn union_simplify_preserves_coverage(boxes in prop::collection::vec(boxed(), 1..6), pts in points()) {
        let s = simplifier();
        let original: Disjunction = boxes.iter().cloned().collect();
        let simplified = s.union_simplify(boxes);
        prop_assert!(simplified.len() <= original.len());
        for point in &pts {
            prop_assert_eq!(original.contains_point(point), simplified.contains_point(point));
        }
    }

    #[test]
    fn effective_rules_never_overlap(rules in prop::collection::vec(boxed(), 1..5), pts in points()) {
        let s = simplifier();
        let effective = s.effective(&rules);
        for point in &pts {
            let claimed = effective.iter().filter(|d| d.contains_point(point)).count();
            let first = rules.iter().position(|r| contains(r, point));
            prop_assert!(claimed <= 1);
            match first {
                Some(i) => prop_assert!(effective[i].contains_point(point)),
                None => prop_assert_eq!(claimed, 0),
            }
        }
    }
}
