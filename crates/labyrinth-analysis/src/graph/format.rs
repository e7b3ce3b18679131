//! Diagnostic Formatter. The text layout is consumed by verification
//! tooling and must stay byte-stable.

use labyrinth_core::constants::{NO_CYCLES, NO_PATHS, NO_ROUTES, PATH_SEPARATOR, UNIVERSE};
use labyrinth_core::types::{Direction, NodeId};

use super::types::{AnalysisResult, Cycle, Flow, Graph};
use crate::setops::ConstraintSet;

impl Graph {
    /// Render one flow:
    ///
    /// ```text
    /// server:
    ///   paths:
    ///     internet => gateway => server
    ///
    ///   routes:
    ///     destination port: 443
    /// ```
    ///
    /// With `verbose`, each path is followed by its own dimension lines.
    /// Inbound paths are printed in traffic order.
    pub fn format_flow(&self, flow: &Flow, direction: Direction, verbose: bool) -> String {
        let mut lines = vec![format!("{}:", self.key(flow.node)), "  paths:".to_string()];

        if flow.paths.is_empty() {
            lines.push(format!("    {NO_PATHS}"));
        }
        for path in &flow.paths {
            lines.push(format!("    {}", self.join_path(&path.nodes, direction)));
            if verbose {
                self.push_dimensions(&mut lines, &path.route, "      ");
            }
        }

        lines.push(String::new());
        lines.push("  routes:".to_string());
        if flow.routes.is_empty() {
            lines.push(format!("    {NO_ROUTES}"));
        }
        for (i, route) in flow.routes.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            if self.simplifier.is_whole(route) {
                lines.push(format!("    {UNIVERSE}"));
            } else {
                self.push_dimensions(&mut lines, route, "    ");
            }
        }

        lines.join("\n")
    }

    /// Render a cycle as its node sequence; with `verbose`, followed by the
    /// dimension lines that tell it apart from other loops. Inbound cycles
    /// are printed in traffic order, like inbound paths.
    pub fn format_cycle(&self, cycle: &Cycle, direction: Direction, verbose: bool) -> String {
        let mut lines = vec![self.join_path(&cycle.nodes, direction)];
        if verbose {
            self.push_dimensions(&mut lines, &cycle.route, "  ");
        }
        lines.join("\n")
    }

    /// Every flow followed by a `cycles:` section.
    pub fn format_analysis(&self, result: &AnalysisResult, direction: Direction, verbose: bool) -> String {
        self.format_report(result, direction, verbose, true)
    }

    pub(crate) fn format_report(
        &self,
        result: &AnalysisResult,
        direction: Direction,
        verbose: bool,
        show_unreached: bool,
    ) -> String {
        let mut sections: Vec<String> = result
            .flows
            .iter()
            .filter(|flow| show_unreached || flow.is_reachable())
            .map(|flow| self.format_flow(flow, direction, verbose))
            .collect();

        sections.push("cycles:".to_string());
        if result.cycles.is_empty() {
            sections.push(format!("  {NO_CYCLES}"));
        }
        for cycle in &result.cycles {
            let text = self.format_cycle(cycle, direction, verbose);
            sections.extend(text.lines().map(|line| format!("  {line}")));
        }
        sections.join("\n")
    }

    fn join_path(&self, nodes: &[NodeId], direction: Direction) -> String {
        let keys: Vec<&str> = match direction {
            Direction::Outbound => nodes.iter().map(|&id| self.key(id)).collect(),
            Direction::Inbound => nodes.iter().rev().map(|&id| self.key(id)).collect(),
        };
        keys.join(PATH_SEPARATOR)
    }

    fn push_dimensions(&self, lines: &mut Vec<String>, route: &ConstraintSet, indent: &str) {
        for (name, value) in self.simplifier.describe(route) {
            lines.push(format!("{indent}{name}: {value}"));
        }
    }
}
