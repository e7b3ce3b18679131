//! Shared data structures for Labyrinth.
//! FxHashMap/SmallVec aliases, dense node ids, traversal direction.

pub mod collections;
pub mod direction;
pub mod identifiers;

pub use collections::{FxHashMap, FxHashSet, SmallVec};
pub use direction::Direction;
pub use identifiers::NodeId;
