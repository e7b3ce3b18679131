//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for the per-dimension ranges of one box (usually 5).
pub type SmallVec5<T> = SmallVec<[T; 5]>;

/// SmallVec sized for the intervals of one dimension value (usually 1-2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
