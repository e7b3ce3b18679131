//! Configuration system for Labyrinth.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod analysis_config;
pub mod labyrinth_config;
pub mod report_config;
pub mod symbol_config;

pub use analysis_config::AnalysisConfig;
pub use labyrinth_config::{ConfigOverrides, LabyrinthConfig};
pub use report_config::ReportConfig;
pub use symbol_config::SymbolConfig;
