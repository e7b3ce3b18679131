//! labyrinth-analysis: network reachability over rule graphs.
//!
//! - Dimensions: interval-set algebra for addresses, ports and protocols
//! - Universe: the ordered dimension schema plus symbol substitutions
//! - Setops: boxes (one range per dimension), disjunctions and the Simplifier
//! - Graph: spec input, builder, first-match traversal, flows/cycles, reports
//! - Session: config-driven wiring of the above for one analysis session

pub mod dimensions;
pub mod graph;
pub mod session;
pub mod setops;
pub mod universe;

pub use dimensions::{DimensionKind, Interval, IntervalSet};
pub use graph::{
    AnalysisOptions, AnalysisResult, AnalysisStats, Cycle, Flow, Graph, GraphBuilder, GraphSpec,
    Literal, NodeSpec, Path, RuleSpec,
};
pub use session::Session;
pub use setops::{ConstraintSet, Disjunction, Simplifier};
pub use universe::{Dimension, DimensionSpec, SymbolTable, Universe};
