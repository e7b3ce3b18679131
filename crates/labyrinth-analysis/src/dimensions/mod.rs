//! Per-dimension range algebra.
//!
//! Every dimension value is an [`IntervalSet`]: a canonical set of disjoint,
//! non-adjacent inclusive intervals over the dimension's integer domain.
//! Union, intersection and complement are exact, and equality is structural,
//! so "simplify" is simply the canonical form. [`DimensionKind`] supplies the
//! domain plus literal parsing and display for addresses, ports and protocols.

pub mod interval_set;
pub mod ip;
pub mod kind;
pub mod port;
pub mod protocol;

pub use interval_set::{Interval, IntervalSet};
pub use kind::DimensionKind;
