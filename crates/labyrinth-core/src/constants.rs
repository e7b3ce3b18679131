//! Shared constants for the Labyrinth engine.

/// Labyrinth version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "labyrinth.toml";

/// User-level config directory name, relative to the home directory.
pub const USER_CONFIG_DIR: &str = ".labyrinth";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "LABYRINTH_LOG";

/// Filter used when `LABYRINTH_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "labyrinth=info";

/// Default verbosity of rendered reports.
pub const DEFAULT_VERBOSE: bool = true;

/// Well-known platform load balancer / health check address.
pub const AZURE_LOAD_BALANCER_ADDRESS: &str = "168.63.129.16";

// ---- Dimension domains ----

/// Largest port number.
pub const MAX_PORT: u32 = 65_535;

/// Largest IP protocol number.
pub const MAX_PROTOCOL: u32 = 255;

/// Protocol numbers with well-known names, in display order.
pub const PROTOCOL_NAMES: [(u32, &str); 3] = [(1, "icmp"), (6, "tcp"), (17, "udp")];

// ---- Report strings ----

/// Placeholder for a flow without paths.
pub const NO_PATHS: &str = "(no paths)";

/// Placeholder for a flow without routes.
pub const NO_ROUTES: &str = "(no routes)";

/// Placeholder for an analysis without cycles.
pub const NO_CYCLES: &str = "(no cycles)";

/// Rendering of a route box that constrains nothing.
pub const UNIVERSE: &str = "(universe)";

/// Separator between node keys in rendered paths and cycles.
pub const PATH_SEPARATOR: &str = " => ";
