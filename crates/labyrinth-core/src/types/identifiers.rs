//! Dense index types for graph entities.
//!
//! Node keys are resolved to indices once at build time so that traversal
//! never hashes strings. Each id type is a distinct newtype to prevent
//! cross-type confusion.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id from a position.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// The position this id refers to.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self::new(index)
            }
        }
    };
}

define_id!(
    /// Index of a node in a built graph, in declaration order.
    NodeId
);
