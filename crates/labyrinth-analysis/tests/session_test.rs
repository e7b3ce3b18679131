//! Config-driven analysis sessions.

use labyrinth_analysis::{GraphSpec, NodeSpec, RuleSpec, Session};
use labyrinth_core::config::SymbolConfig;
use labyrinth_core::errors::{GraphError, UniverseError};
use labyrinth_core::types::Direction;
use labyrinth_core::LabyrinthConfig;

fn spec() -> GraphSpec {
    GraphSpec::new(vec![
        NodeSpec::new("internet")
            .endpoint()
            .rule(RuleSpec::to("gateway").with("destinationIp", "gateway"))
            .rule(RuleSpec::to("elsewhere").with("destinationPort", "https")),
        NodeSpec::new("gateway").rule(RuleSpec::to("vm").with("protocol", "tcp")),
        NodeSpec::new("vm").endpoint(),
        NodeSpec::new("elsewhere"),
        NodeSpec::new("island"),
    ])
}

fn config() -> LabyrinthConfig {
    let mut config = LabyrinthConfig::default();
    config.symbols = vec![
        SymbolConfig {
            dimension: "ip".into(),
            symbol: "gateway".into(),
            range: "10.0.0.1".into(),
        },
        SymbolConfig {
            dimension: "port".into(),
            symbol: "https".into(),
            range: "443".into(),
        },
    ];
    config
}

#[test]
fn test_session_substitutes_configured_symbols() {
    let session = Session::new(config()).unwrap();
    let graph = session.build(&spec()).unwrap();
    let result = session.analyze(&graph, "internet").unwrap();

    let vm = result.flow(graph.id("vm").unwrap()).unwrap();
    assert_eq!(
        graph.format_flow(vm, Direction::Outbound, false),
        "vm:\n  paths:\n    internet => gateway => vm\n\n  routes:\n    destination ip: 10.0.0.1\n    protocol: tcp"
    );
}

#[test]
fn test_report_hides_unreached_when_configured() {
    let mut config = config();
    config.report.verbose = Some(false);
    config.report.show_unreached = Some(false);
    let session = Session::new(config).unwrap();
    let graph = session.build(&spec()).unwrap();
    let result = session.analyze(&graph, "internet").unwrap();

    let report = session.report(&graph, &result);
    assert!(!report.contains("island:"));
    assert!(!report.contains("(no paths)"));
    assert!(report.contains("elsewhere:\n  paths:\n    internet => elsewhere\n\n  routes:\n    destination ip: except 10.0.0.1\n    destination port: 443\n"));
    assert!(report.ends_with("cycles:\n  (no cycles)"));
}

#[test]
fn test_configured_direction_and_depth() {
    let mut config = config();
    config.analysis.direction = Some(Direction::Inbound);
    config.analysis.max_depth = Some(1);
    let session = Session::new(config).unwrap();
    let graph = session.build(&spec()).unwrap();

    // vm <- gateway <- internet is two edges deep.
    let err = session.analyze(&graph, "vm").unwrap_err();
    assert_eq!(err, GraphError::DepthLimitExceeded { origin: "vm".into(), limit: 1 });

    let result = session.analyze(&graph, "gateway").unwrap();
    let internet = result.flow(graph.id("internet").unwrap()).unwrap();
    assert_eq!(internet.paths.len(), 1);
}

#[test]
fn test_analyze_all_sequential_and_parallel_agree() {
    let origins = ["internet", "gateway", "island"];

    let parallel = Session::new(config()).unwrap();
    let graph = parallel.build(&spec()).unwrap();
    let a = parallel.analyze_all(&graph, &origins).unwrap();

    let mut sequential_config = config();
    sequential_config.analysis.parallel = Some(false);
    let sequential = Session::new(sequential_config).unwrap();
    let b = sequential.analyze_all(&graph, &origins).unwrap();

    assert_eq!(a.len(), 3);
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.origin, y.origin);
        assert_eq!(x.flows, y.flows);
    }
}

#[test]
fn test_duplicate_symbol_rejected() {
    let mut config = config();
    config.symbols.push(SymbolConfig {
        dimension: "ip".into(),
        symbol: "gateway".into(),
        range: "10.0.0.2".into(),
    });
    let err = Session::new(config).unwrap_err();
    assert!(matches!(err, UniverseError::DuplicateSymbol { .. }));
}
