//! Graph Builder: validates node specs and precomputes both adjacencies.

use labyrinth_core::errors::GraphError;
use labyrinth_core::types::{FxHashMap, NodeId};

use super::spec::{GraphSpec, Literal, NodeSpec, RuleSpec};
use super::types::{Edge, Graph, Node, Target};
use crate::dimensions::IntervalSet;
use crate::setops::{ConstraintSet, Simplifier};

/// Builds a [`Graph`] from node specs against one Universe.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    simplifier: Simplifier,
}

impl GraphBuilder {
    pub fn new(simplifier: Simplifier) -> Self {
        Self { simplifier }
    }

    pub fn build_spec(&self, spec: &GraphSpec) -> Result<Graph, GraphError> {
        self.build(&spec.nodes)
    }

    /// Build the graph.
    ///
    /// Duplicate keys are rejected before anything else is looked at. Rules
    /// naming an unknown destination are kept; traversal fails when it
    /// reaches one.
    pub fn build(&self, specs: &[NodeSpec]) -> Result<Graph, GraphError> {
        let mut index: FxHashMap<String, NodeId> = FxHashMap::default();
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.key.clone(), NodeId::new(i)).is_some() {
                return Err(GraphError::DuplicateKey {
                    key: spec.key.clone(),
                });
            }
        }

        let mut nodes: Vec<Node> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Node {
                id: NodeId::new(i),
                key: spec.key.clone(),
                name: spec.name.clone(),
                endpoint: spec.endpoint,
                outbound: Vec::with_capacity(spec.rules.len()),
                inbound: Vec::new(),
            })
            .collect();

        // (destination, source, rule index, box), in node then rule order.
        let mut reverse: Vec<(NodeId, NodeId, usize, ConstraintSet)> = Vec::new();

        for (i, spec) in specs.iter().enumerate() {
            let boxes = spec
                .rules
                .iter()
                .map(|rule| self.rule_box(&spec.key, rule))
                .collect::<Result<Vec<_>, _>>()?;
            let effective = self.simplifier.effective(&boxes);

            for (rule_index, ((rule, set), effective)) in spec
                .rules
                .iter()
                .zip(boxes)
                .zip(effective)
                .enumerate()
            {
                let target = match index.get(&rule.destination) {
                    Some(&id) => {
                        reverse.push((id, NodeId::new(i), rule_index, set.clone()));
                        Target::Resolved(id)
                    }
                    None => Target::Unresolved(rule.destination.clone()),
                };
                nodes[i].outbound.push(Edge {
                    target,
                    rule_index,
                    rule: set,
                    effective,
                    overrides: self.overrides(&spec.key, rule)?,
                });
            }
        }

        for (destination, source, rule_index, set) in reverse {
            let node = &mut nodes[destination.index()];
            node.inbound.push(Edge {
                target: Target::Resolved(source),
                rule_index,
                rule: set,
                effective: Default::default(),
                overrides: Vec::new(),
            });
        }
        for node in &mut nodes {
            let boxes: Vec<ConstraintSet> = node.inbound.iter().map(|e| e.rule.clone()).collect();
            for (edge, effective) in node.inbound.iter_mut().zip(self.simplifier.effective(&boxes)) {
                edge.effective = effective;
            }
        }

        let graph = Graph {
            simplifier: self.simplifier.clone(),
            nodes,
            index,
        };
        tracing::debug!(
            node_count = graph.len(),
            rule_count = graph.rule_count(),
            "graph built"
        );
        Ok(graph)
    }

    fn rule_box(&self, node: &str, rule: &RuleSpec) -> Result<ConstraintSet, GraphError> {
        let literals = render(&rule.constraints);
        self.simplifier
            .universe()
            .constraint_set(node, literals.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    fn overrides(&self, node: &str, rule: &RuleSpec) -> Result<Vec<(usize, IntervalSet)>, GraphError> {
        let universe = self.simplifier.universe();
        render(&rule.overrides)
            .into_iter()
            .map(|(key, text)| {
                let index = universe
                    .index_of(&key)
                    .ok_or_else(|| GraphError::UnknownDimension {
                        node: node.to_string(),
                        dimension: key.clone(),
                    })?;
                let range = universe
                    .parse_range(index, &text)
                    .map_err(|source| GraphError::InvalidConstraint {
                        node: node.to_string(),
                        dimension: key.clone(),
                        source,
                    })?;
                Ok((index, range))
            })
            .collect()
    }
}

fn render<'a, I>(literals: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a Literal)>,
{
    literals
        .into_iter()
        .map(|(key, literal)| (key.clone(), literal.to_string()))
        .collect()
}
