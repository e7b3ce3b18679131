//! LabyrinthErrorCode trait for structured error reporting.

/// Trait for mapping Labyrinth errors to stable error codes.
/// Every error enum implements this so tooling can match on a code
/// instead of parsing messages.
pub trait LabyrinthErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_NODE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const RANGE_ERROR: &str = "RANGE_ERROR";
pub const UNIVERSE_ERROR: &str = "UNIVERSE_ERROR";
pub const DUPLICATE_KEY: &str = "DUPLICATE_KEY";
pub const UNKNOWN_NODE: &str = "UNKNOWN_NODE";
pub const UNKNOWN_DIMENSION: &str = "UNKNOWN_DIMENSION";
pub const INVALID_CONSTRAINT: &str = "INVALID_CONSTRAINT";
pub const DEPTH_LIMIT_EXCEEDED: &str = "DEPTH_LIMIT_EXCEEDED";
pub const SPEC_FORMAT: &str = "SPEC_FORMAT";
pub const UNSUPPORTED_RESOURCE: &str = "UNSUPPORTED_RESOURCE";
pub const CONVERT_ERROR: &str = "CONVERT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
