//! Tests for the Labyrinth configuration system.

use std::sync::Mutex;

use labyrinth_core::config::{ConfigOverrides, LabyrinthConfig};
use labyrinth_core::errors::ConfigError;
use labyrinth_core::types::Direction;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all LABYRINTH_ env vars and point HOME at an empty directory so
/// a developer's own user config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "LABYRINTH_ANALYSIS_DIRECTION",
        "LABYRINTH_ANALYSIS_MAX_DEPTH",
        "LABYRINTH_ANALYSIS_PARALLEL",
        "LABYRINTH_REPORT_VERBOSE",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("labyrinth.toml"),
        r#"
[analysis]
direction = "inbound"
max_depth = 10

[report]
verbose = false
"#,
    )
    .unwrap();

    std::env::set_var("LABYRINTH_ANALYSIS_MAX_DEPTH", "20");

    let overrides = ConfigOverrides {
        verbose: Some(true),
        ..Default::default()
    };
    let config = LabyrinthConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Project file supplies direction.
    assert_eq!(config.analysis.effective_direction(), Direction::Inbound);
    // Env beats project for max_depth.
    assert_eq!(config.analysis.max_depth, Some(20));
    // Overrides beat project for verbose.
    assert!(config.report.effective_verbose());

    isolate_env(home.path());
}

#[test]
fn test_user_config_is_lowest_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".labyrinth");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        r#"
[analysis]
max_depth = 5
parallel = false

[[symbols]]
dimension = "ip"
symbol = "Gateway"
range = "10.0.0.1"
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("labyrinth.toml"),
        r#"
[analysis]
max_depth = 7

[[symbols]]
dimension = "ip"
symbol = "Gateway"
range = "10.0.0.254"
"#,
    )
    .unwrap();

    let config = LabyrinthConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.analysis.max_depth, Some(7));
    assert!(!config.analysis.effective_parallel());
    assert_eq!(config.symbols.len(), 1);
    assert_eq!(config.symbols[0].range, "10.0.0.254");
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = LabyrinthConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.analysis.effective_direction(), Direction::Outbound);
    assert_eq!(config.analysis.max_depth, None);
    assert!(config.analysis.effective_parallel());
    assert!(config.report.effective_verbose());
    assert!(config.report.effective_show_unreached());
    assert!(config.symbols.is_empty());
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("labyrinth.toml"), "this is not valid toml {{{{").unwrap();

    match LabyrinthConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_invalid_env_direction_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("LABYRINTH_ANALYSIS_DIRECTION", "sideways");
    let dir = tempdir();
    let result = LabyrinthConfig::load(dir.path(), None);
    match result {
        Err(ConfigError::InvalidValue { field, value }) => {
            assert_eq!(field, "LABYRINTH_ANALYSIS_DIRECTION");
            assert_eq!(value, "sideways");
        }
        other => panic!("Expected InvalidValue, got: {:?}", other),
    }

    isolate_env(home.path());
}

#[test]
fn test_zero_max_depth_fails_validation() {
    let result = LabyrinthConfig::from_toml("[analysis]\nmax_depth = 0\n");
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "analysis.max_depth");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_unknown_symbol_dimension_fails_validation() {
    let result = LabyrinthConfig::from_toml(
        r#"
[[symbols]]
dimension = "vlan"
symbol = "Prod"
range = "7"
"#,
    );
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_toml_round_trip() {
    let config = LabyrinthConfig::from_toml(
        r#"
[analysis]
direction = "inbound"
max_depth = 3

[[symbols]]
dimension = "protocol"
symbol = "Web"
range = "tcp"
"#,
    )
    .unwrap();

    let text = config.to_toml().unwrap();
    let reparsed = LabyrinthConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed.analysis.direction, Some(Direction::Inbound));
    assert_eq!(reparsed.analysis.max_depth, Some(3));
    assert_eq!(reparsed.symbols, config.symbols);
}
