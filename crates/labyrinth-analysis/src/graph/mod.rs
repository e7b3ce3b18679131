//! Graph model: spec input, builder, traversal and reports.

pub mod builder;
pub mod format;
pub mod spec;
pub mod traverse;
pub mod types;

pub use builder::GraphBuilder;
pub use spec::{GraphSpec, Literal, NodeSpec, RuleSpec};
pub use types::{
    AnalysisOptions, AnalysisResult, AnalysisStats, Cycle, Edge, Flow, Graph, Node, Path, Target,
};
