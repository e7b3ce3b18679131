//! Traversal Engine: first-match depth-first reachability from one origin.
//!
//! The walk keeps an explicit stack of frames (the active path). Each frame
//! remembers which rule and which piece of that rule's effective box it will
//! try next, so children are visited in rule declaration order without
//! recursion.

use std::time::Instant;

use labyrinth_core::errors::GraphError;
use labyrinth_core::types::{Direction, FxHashSet, NodeId};
use rayon::prelude::*;

use super::types::{AnalysisOptions, AnalysisResult, AnalysisStats, Cycle, Edge, Flow, Graph, Path, Target};
use crate::setops::ConstraintSet;

struct Frame {
    node: NodeId,
    condition: ConstraintSet,
    edge: usize,
    piece: usize,
}

enum Step {
    Pop,
    Next,
    Visit { target: NodeId, route: ConstraintSet },
}

impl Graph {
    pub fn analyze(&self, origin: &str, direction: Direction) -> Result<AnalysisResult, GraphError> {
        self.analyze_with(origin, direction, &AnalysisOptions::default())
    }

    /// Analyze several origins in parallel. Results come back in input order;
    /// the first failure aborts the whole call.
    pub fn analyze_many(
        &self,
        origins: &[&str],
        direction: Direction,
        options: &AnalysisOptions,
    ) -> Result<Vec<AnalysisResult>, GraphError> {
        origins
            .par_iter()
            .map(|origin| self.analyze_with(origin, direction, options))
            .collect()
    }

    pub fn analyze_with(
        &self,
        origin: &str,
        direction: Direction,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, GraphError> {
        let start = Instant::now();
        let origin_id = self.id(origin).ok_or_else(|| GraphError::UnknownNode {
            key: origin.to_string(),
        })?;

        let mut stats = AnalysisStats::default();
        let mut paths: Vec<Vec<Path>> = vec![Vec::new(); self.nodes.len()];
        let mut cycles: Vec<Cycle> = Vec::new();
        let mut seen_cycles: FxHashSet<Cycle> = FxHashSet::default();

        // Stack depth of each node currently on the active path.
        let mut active: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut stack = vec![Frame {
            node: origin_id,
            condition: self.simplifier.whole(),
            edge: 0,
            piece: 0,
        }];
        active[origin_id.index()] = Some(0);

        while let Some(frame) = stack.last_mut() {
            match self.step(frame, direction)? {
                Step::Pop => {
                    active[frame.node.index()] = None;
                    stack.pop();
                }
                Step::Next => stats.branches_pruned += 1,
                Step::Visit { target, route } => {
                    if let Some(limit) = options.max_depth {
                        if stack.len() > limit {
                            return Err(GraphError::DepthLimitExceeded {
                                origin: origin.to_string(),
                                limit,
                            });
                        }
                    }

                    let walked = || {
                        stack
                            .iter()
                            .map(|f| f.node)
                            .chain(std::iter::once(target))
                            .collect::<Vec<_>>()
                    };

                    match active[target.index()] {
                        Some(depth) if !self.node(target).endpoint => {
                            // Traffic delivered to an endpoint inside the loop
                            // starts a new flow there; that is not a routing loop.
                            if stack[depth..].iter().any(|f| self.node(f.node).endpoint) {
                                continue;
                            }
                            let mut nodes = walked();
                            nodes.drain(..depth);
                            let cycle = Cycle { nodes, route };
                            if seen_cycles.insert(cycle.clone()) {
                                cycles.push(cycle);
                            }
                        }
                        Some(_) => {
                            paths[target.index()].push(Path {
                                nodes: walked(),
                                route,
                            });
                            stats.paths_recorded += 1;
                        }
                        None => {
                            paths[target.index()].push(Path {
                                nodes: walked(),
                                route: route.clone(),
                            });
                            stats.paths_recorded += 1;
                            active[target.index()] = Some(stack.len());
                            stack.push(Frame {
                                node: target,
                                condition: route,
                                edge: 0,
                                piece: 0,
                            });
                        }
                    }
                }
            }
        }

        let flows = paths
            .into_iter()
            .enumerate()
            .map(|(i, paths)| Flow {
                node: NodeId::new(i),
                routes: self
                    .simplifier
                    .union_simplify(paths.iter().map(|p| p.route.clone())),
                paths,
            })
            .collect();

        stats.cycles_found = cycles.len() as u64;
        stats.analyze_time_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            origin,
            direction = direction.name(),
            paths_recorded = stats.paths_recorded,
            branches_pruned = stats.branches_pruned,
            cycles_found = stats.cycles_found,
            analyze_time_us = stats.analyze_time_us,
            "analysis complete"
        );

        Ok(AnalysisResult {
            origin: origin_id,
            flows,
            cycles,
            stats,
        })
    }

    fn edges(&self, node: NodeId, direction: Direction) -> &[Edge] {
        match direction {
            Direction::Outbound => &self.node(node).outbound,
            Direction::Inbound => &self.node(node).inbound,
        }
    }

    /// Advance `frame` by one (rule, piece) pair.
    fn step(&self, frame: &mut Frame, direction: Direction) -> Result<Step, GraphError> {
        loop {
            let Some(edge) = self.edges(frame.node, direction).get(frame.edge) else {
                return Ok(Step::Pop);
            };
            let target = match &edge.target {
                Target::Resolved(id) => *id,
                // Checked before pruning so a shadowed rule to a missing node still fails.
                Target::Unresolved(key) => {
                    return Err(GraphError::UnknownNode { key: key.clone() });
                }
            };
            let Some(piece) = edge.effective.boxes().get(frame.piece) else {
                frame.edge += 1;
                frame.piece = 0;
                continue;
            };
            frame.piece += 1;

            let mut route = frame.condition.intersect(piece);
            if route.is_empty() {
                tracing::trace!(
                    from = self.key(frame.node),
                    to = self.key(target),
                    rule = edge.rule_index,
                    "branch pruned"
                );
                return Ok(Step::Next);
            }
            for (dimension, range) in &edge.overrides {
                route = route.with_range(*dimension, range.clone());
            }
            return Ok(Step::Visit { target, route });
        }
    }
}
