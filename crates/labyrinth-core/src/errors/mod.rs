//! Error handling for Labyrinth.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod convert_error;
pub mod error_code;
pub mod graph_error;
pub mod labyrinth_error;
pub mod range_error;
pub mod universe_error;

pub use config_error::ConfigError;
pub use convert_error::ConvertError;
pub use error_code::LabyrinthErrorCode;
pub use graph_error::GraphError;
pub use labyrinth_error::LabyrinthError;
pub use range_error::RangeError;
pub use universe_error::UniverseError;
