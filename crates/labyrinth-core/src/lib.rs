//! labyrinth-core: shared foundation for the Labyrinth reachability engine.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable error code
//! - Config: TOML-based, layered resolution (overrides > env > project > user > defaults)
//! - Tracing: `tracing` + `EnvFilter` driven by `LABYRINTH_LOG`
//! - Types: traversal direction, node ids, fast collections

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::LabyrinthConfig;
pub use errors::{LabyrinthError, LabyrinthErrorCode};
pub use types::{Direction, NodeId};
