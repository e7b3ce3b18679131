//! Built graph and analysis result types.

use labyrinth_core::tracing::metrics;
use labyrinth_core::types::{FxHashMap, NodeId};

use crate::dimensions::IntervalSet;
use crate::setops::{ConstraintSet, Disjunction, Simplifier};

/// Where a rule forwards to. Unknown keys are kept until traversal reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Resolved(NodeId),
    Unresolved(String),
}

/// One rule as stored on a node, in one direction.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: Target,
    /// Position of the rule in its owner's declaration order.
    pub rule_index: usize,
    /// The rule's own box.
    pub rule: ConstraintSet,
    /// The rule's box minus every earlier rule on the same node.
    pub effective: Disjunction,
    /// Dimension ranges written over the path box once the rule matches.
    pub overrides: Vec<(usize, IntervalSet)>,
}

/// A built node with its forward rules and the synthesized reverse rules.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub key: String,
    pub name: Option<String>,
    pub endpoint: bool,
    pub(crate) outbound: Vec<Edge>,
    pub(crate) inbound: Vec<Edge>,
}

impl Node {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    pub fn outbound(&self) -> &[Edge] {
        &self.outbound
    }

    pub fn inbound(&self) -> &[Edge] {
        &self.inbound
    }
}

/// The validated topology. Immutable after construction and safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) simplifier: Simplifier,
    pub(crate) nodes: Vec<Node>,
    pub(crate) index: FxHashMap<String, NodeId>,
}

impl Graph {
    pub fn simplifier(&self) -> &Simplifier {
        &self.simplifier
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn key(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].key
    }

    pub fn id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outbound.len()).sum()
    }
}

/// One walk from the origin. `route` is the intersection of every effective
/// rule box traversed, after overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub route: ConstraintSet,
}

/// Everything reaching one node from the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub node: NodeId,
    pub paths: Vec<Path>,
    /// Union of the path routes, simplified.
    pub routes: Disjunction,
}

impl Flow {
    pub fn is_reachable(&self) -> bool {
        !self.paths.is_empty()
    }
}

/// A routing loop through non-endpoint nodes. The first and last node are
/// the same; `route` tells apart loops over the same nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle {
    pub nodes: Vec<NodeId>,
    pub route: ConstraintSet,
}

/// Counters collected during one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub paths_recorded: u64,
    pub branches_pruned: u64,
    pub cycles_found: u64,
    pub analyze_time_us: u64,
}

impl AnalysisStats {
    /// The counters keyed by their structured field names.
    pub fn fields(&self) -> [(&'static str, u64); 4] {
        [
            (metrics::PATHS_RECORDED, self.paths_recorded),
            (metrics::BRANCHES_PRUNED, self.branches_pruned),
            (metrics::CYCLES_FOUND, self.cycles_found),
            (metrics::ANALYZE_TIME_US, self.analyze_time_us),
        ]
    }
}

/// Result of one `analyze` call: one flow per node in declaration order,
/// and the loops found on the way.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub origin: NodeId,
    pub flows: Vec<Flow>,
    pub cycles: Vec<Cycle>,
    pub stats: AnalysisStats,
}

impl AnalysisResult {
    pub fn flow(&self, node: NodeId) -> Option<&Flow> {
        self.flows.iter().find(|f| f.node == node)
    }

    pub fn reachable(&self) -> impl Iterator<Item = &Flow> {
        self.flows.iter().filter(|f| f.is_reachable())
    }
}

/// Traversal limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Maximum number of edges in a recorded path. Exceeding it fails the analysis.
    pub max_depth: Option<usize>,
}

impl AnalysisOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

