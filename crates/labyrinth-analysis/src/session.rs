//! One analysis session: configuration, Universe and Simplifier bundled as
//! explicit values and handed to the builder and the traversal engine.

use std::sync::Arc;

use labyrinth_core::errors::{GraphError, UniverseError};
use labyrinth_core::types::Direction;
use labyrinth_core::LabyrinthConfig;

use crate::graph::{AnalysisOptions, AnalysisResult, Graph, GraphBuilder, GraphSpec};
use crate::setops::Simplifier;
use crate::universe::Universe;

#[derive(Debug, Clone)]
pub struct Session {
    config: LabyrinthConfig,
    simplifier: Simplifier,
}

impl Session {
    /// Firewall Universe plus the symbols declared in `config`.
    pub fn new(config: LabyrinthConfig) -> Result<Self, UniverseError> {
        let universe = Universe::from_config(&config.symbols)?;
        Ok(Self::with_universe(config, universe))
    }

    pub fn with_universe(config: LabyrinthConfig, universe: Universe) -> Self {
        Self {
            config,
            simplifier: Simplifier::new(Arc::new(universe)),
        }
    }

    pub fn config(&self) -> &LabyrinthConfig {
        &self.config
    }

    pub fn universe(&self) -> &Universe {
        self.simplifier.universe()
    }

    pub fn simplifier(&self) -> &Simplifier {
        &self.simplifier
    }

    pub fn direction(&self) -> Direction {
        self.config.analysis.effective_direction()
    }

    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            max_depth: self.config.analysis.max_depth,
        }
    }

    pub fn builder(&self) -> GraphBuilder {
        GraphBuilder::new(self.simplifier.clone())
    }

    pub fn build(&self, spec: &GraphSpec) -> Result<Graph, GraphError> {
        self.builder().build_spec(spec)
    }

    /// Analyze from `origin` in the configured direction and depth limit.
    pub fn analyze(&self, graph: &Graph, origin: &str) -> Result<AnalysisResult, GraphError> {
        graph.analyze_with(origin, self.direction(), &self.options())
    }

    /// Analyze several origins, in parallel unless disabled in config.
    pub fn analyze_all(&self, graph: &Graph, origins: &[&str]) -> Result<Vec<AnalysisResult>, GraphError> {
        let options = self.options();
        if self.config.analysis.effective_parallel() {
            graph.analyze_many(origins, self.direction(), &options)
        } else {
            origins
                .iter()
                .map(|origin| graph.analyze_with(origin, self.direction(), &options))
                .collect()
        }
    }

    /// Render with the configured verbosity; unreached nodes are left out
    /// when `report.show_unreached` is off.
    pub fn report(&self, graph: &Graph, result: &AnalysisResult) -> String {
        graph.format_report(
            result,
            self.direction(),
            self.config.report.effective_verbose(),
            self.config.report.effective_show_unreached(),
        )
    }
}
