//! Structured field names for analysis statistics.
//!
//! `AnalysisStats::fields` pairs each counter with its name here so that
//! reports and log queries agree on spelling.

/// Number of paths recorded.
pub const PATHS_RECORDED: &str = "paths_recorded";

/// Number of branches pruned because their box became empty.
pub const BRANCHES_PRUNED: &str = "branches_pruned";

/// Number of distinct cycles found.
pub const CYCLES_FOUND: &str = "cycles_found";

/// Wall time of one `analyze` call in microseconds.
pub const ANALYZE_TIME_US: &str = "analyze_time_us";
