//! Tests for the Labyrinth error handling system.

use labyrinth_core::errors::*;

#[test]
fn test_core_error_messages_are_literal() {
    let duplicate = GraphError::DuplicateKey {
        key: "internet".into(),
    };
    assert_eq!(duplicate.to_string(), "Duplicate node key \"internet\".");

    let unknown = GraphError::UnknownNode {
        key: "bad_key".into(),
    };
    assert_eq!(unknown.to_string(), "Unknown node \"bad_key\".");
}

#[test]
fn test_all_errors_have_error_code() {
    let range = RangeError::InvalidPort { text: "x".into() };
    assert_eq!(range.error_code(), "RANGE_ERROR");

    let universe = UniverseError::NoDimensions;
    assert_eq!(universe.error_code(), "UNIVERSE_ERROR");

    let graph = GraphError::UnknownNode { key: "k".into() };
    assert_eq!(graph.error_code(), "UNKNOWN_NODE");

    let graph = GraphError::DuplicateKey { key: "k".into() };
    assert_eq!(graph.error_code(), "DUPLICATE_KEY");

    let convert = ConvertError::UnsupportedResource {
        kind: "microsoft.network/loadbalancers".into(),
        id: "lb".into(),
    };
    assert_eq!(convert.error_code(), "UNSUPPORTED_RESOURCE");

    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_from_conversions() {
    let graph = GraphError::UnknownNode { key: "a".into() };
    let top: LabyrinthError = graph.into();
    assert!(matches!(top, LabyrinthError::Graph(GraphError::UnknownNode { .. })));
    assert_eq!(top.error_code(), "UNKNOWN_NODE");

    let range = RangeError::InvalidAddress { text: "1.2.3".into() };
    let convert: ConvertError = range.into();
    assert_eq!(convert.error_code(), "RANGE_ERROR");
    let top: LabyrinthError = convert.into();
    assert!(matches!(top, LabyrinthError::Convert(ConvertError::Range(_))));

    let convert: ConvertError = UniverseError::DuplicateSymbol {
        kind: "protocol".into(),
        symbol: "Tcp".into(),
    }
    .into();
    assert_eq!(convert.error_code(), "UNIVERSE_ERROR");
}

#[test]
fn test_coded_string_format() {
    let err = GraphError::UnknownNode {
        key: "bad_key".into(),
    };
    assert_eq!(err.coded_string(), "[UNKNOWN_NODE] Unknown node \"bad_key\".");
}

#[test]
fn test_invalid_constraint_keeps_source() {
    use std::error::Error;

    let err = GraphError::InvalidConstraint {
        node: "a".into(),
        dimension: "destinationPort".into(),
        source: RangeError::InvalidPort {
            text: "http".into(),
        },
    };
    assert_eq!(err.error_code(), "INVALID_CONSTRAINT");
    let source = err.source().expect("source error");
    assert_eq!(source.to_string(), "Invalid port \"http\"");
}
