//! Box-level set operations.
//!
//! A [`ConstraintSet`] ("box") assigns one range to every dimension of the
//! Universe and denotes their cartesian product. A [`Disjunction`] is a list
//! of pairwise-disjoint boxes, the shape every residual of a subtraction takes.
//! The [`Simplifier`] owns the Universe-aware operations.

pub mod constraint_set;
pub mod disjunction;
pub mod simplifier;

pub use constraint_set::ConstraintSet;
pub use disjunction::Disjunction;
pub use simplifier::Simplifier;
