//! Top-level Labyrinth configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ReportConfig, SymbolConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::Direction;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LABYRINTH_*`)
/// 3. Project config (`labyrinth.toml` in project root)
/// 4. User config (`~/.labyrinth/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabyrinthConfig {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub symbols: Vec<SymbolConfig>,
}

/// Caller-supplied overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub direction: Option<Direction>,
    pub max_depth: Option<usize>,
    pub verbose: Option<bool>,
}

impl LabyrinthConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LabyrinthConfig) -> Result<(), ConfigError> {
        if config.analysis.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (i, symbol) in config.symbols.iter().enumerate() {
            if !matches!(symbol.dimension.as_str(), "ip" | "port" | "protocol") {
                return Err(ConfigError::ValidationFailed {
                    field: format!("symbols[{i}].dimension"),
                    message: format!(
                        "expected ip, port or protocol, found \"{}\"",
                        symbol.dimension
                    ),
                });
            }
            if symbol.symbol.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("symbols[{i}].symbol"),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.labyrinth/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut LabyrinthConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LabyrinthConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`. Scalar values override only when set;
    /// symbols accumulate, later layers appended after earlier ones.
    fn merge(base: &mut LabyrinthConfig, other: LabyrinthConfig) {
        if other.analysis.direction.is_some() {
            base.analysis.direction = other.analysis.direction;
        }
        if other.analysis.max_depth.is_some() {
            base.analysis.max_depth = other.analysis.max_depth;
        }
        if other.analysis.parallel.is_some() {
            base.analysis.parallel = other.analysis.parallel;
        }

        if other.report.verbose.is_some() {
            base.report.verbose = other.report.verbose;
        }
        if other.report.show_unreached.is_some() {
            base.report.show_unreached = other.report.show_unreached;
        }

        for symbol in other.symbols {
            base.symbols.retain(|s| !(s.dimension == symbol.dimension && s.symbol == symbol.symbol));
            base.symbols.push(symbol);
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LABYRINTH_ANALYSIS_MAX_DEPTH`, `LABYRINTH_REPORT_VERBOSE`, etc.
    fn apply_env_overrides(config: &mut LabyrinthConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("LABYRINTH_ANALYSIS_DIRECTION") {
            let direction = val.parse::<Direction>().map_err(|_| ConfigError::InvalidValue {
                field: "LABYRINTH_ANALYSIS_DIRECTION".to_string(),
                value: val.clone(),
            })?;
            config.analysis.direction = Some(direction);
        }
        if let Ok(val) = std::env::var("LABYRINTH_ANALYSIS_MAX_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LABYRINTH_ANALYSIS_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LABYRINTH_REPORT_VERBOSE") {
            if let Ok(v) = val.parse::<bool>() {
                config.report.verbose = Some(v);
            }
        }
        Ok(())
    }

    /// Apply overrides (highest priority).
    fn apply_overrides(config: &mut LabyrinthConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.direction {
            config.analysis.direction = Some(v);
        }
        if let Some(v) = overrides.max_depth {
            config.analysis.max_depth = Some(v);
        }
        if let Some(v) = overrides.verbose {
            config.report.verbose = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
