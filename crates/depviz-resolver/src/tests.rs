use std::collections::HashMap;

use depviz_core::{DependencyEdge, DependencyGraph, RepositoryIndex, ReportEntry};

use super::*;

fn repo(records: &[(&str, &[&str])]) -> RepositoryIndex {
    records
        .iter()
        .map(|(package, deps)| (*package, deps.iter().copied()))
        .collect()
}

fn edges(graph: &DependencyGraph) -> Vec<(&str, &str)> {
    graph
        .edges()
        .iter()
        .map(|edge| (edge.from.as_str(), edge.to.as_str()))
        .collect()
}

fn position(sequence: &[String], name: &str) -> usize {
    sequence
        .iter()
        .position(|entry| entry == name)
        .unwrap_or_else(|| panic!("{name} missing from {sequence:?}"))
}

#[test]
fn diamond_closure_orders_dependencies_before_dependents() {
    let index = repo(&[("A", &["B", "C"]), ("B", &[]), ("C", &["B"])]);

    let outcome = build_graph("A", &index, "");
    assert_eq!(outcome.graph.sorted_nodes(), vec!["A", "B", "C"]);
    assert_eq!(edges(&outcome.graph), vec![("A", "B"), ("A", "C"), ("C", "B")]);
    assert!(!outcome.has_back_edges());
    assert_eq!(
        outcome.report,
        vec![ReportEntry::SharedDependency {
            from: "C".to_string(),
            to: "B".to_string(),
        }]
    );

    let order = topo_order(&outcome.graph, "A");
    assert!(!order.is_cyclic);
    assert_eq!(order.order, vec!["A", "C", "B"]);

    let install = order.install_sequence();
    assert_eq!(install.last().map(String::as_str), Some("A"));
    assert!(position(&install, "B") < position(&install, "C"));
    assert!(position(&install, "B") < position(&install, "A"));
}

#[test]
fn two_package_cycle_reports_back_edge_and_partial_order() {
    let index = repo(&[("A", &["B"]), ("B", &["A"])]);

    let outcome = build_graph("A", &index, "");
    assert_eq!(outcome.graph.sorted_nodes(), vec!["A", "B"]);
    assert_eq!(edges(&outcome.graph), vec![("A", "B"), ("B", "A")]);
    assert_eq!(
        outcome.report,
        vec![ReportEntry::BackEdge {
            from: "B".to_string(),
            to: "A".to_string(),
        }]
    );
    assert_eq!(outcome.report[0].to_string(), "back edge (cycle): B -> A");

    let order = topo_order(&outcome.graph, "A");
    assert!(order.is_cyclic);
    assert!(order.len() < 2);
    assert_eq!(order.order, vec!["A"]);
}

#[test]
fn filtered_dependency_is_never_recorded() {
    let index = repo(&[("A", &["B", "C"])]);

    let outcome = build_graph("A", &index, "C");
    assert_eq!(outcome.graph.sorted_nodes(), vec!["A", "B"]);
    assert_eq!(edges(&outcome.graph), vec![("A", "B")]);
    assert!(!outcome.graph.contains("C"));
    assert_eq!(outcome.filtered, vec![DependencyEdge::new("A", "C")]);
}

#[test]
fn filtered_start_package_stops_before_traversal() {
    let index = repo(&[("dev-tools", &["B"]), ("B", &[])]);

    let outcome = build_graph("dev-tools", &index, "dev");
    assert!(outcome.graph.is_empty());
    assert!(outcome.graph.edges().is_empty());
    assert_eq!(
        outcome.report,
        vec![ReportEntry::StartFiltered {
            package: "dev-tools".to_string(),
            filter: "dev".to_string(),
        }]
    );
}

#[test]
fn package_without_dependencies_orders_itself() {
    let index = repo(&[("A", &[])]);

    let outcome = build_graph("A", &index, "");
    assert_eq!(outcome.graph.nodes(), &["A"]);
    assert!(outcome.graph.edges().is_empty());

    let order = topo_order(&outcome.graph, "A");
    assert_eq!(order.order, vec!["A"]);
    assert!(!order.is_cyclic);
}

#[test]
fn unknown_dependency_becomes_leaf_node() {
    let index = repo(&[("app", &["lib"]), ("lib", &["ghost"])]);

    let analysis = analyze("app", &index, "").expect("analysis must succeed");
    let graph = &analysis.outcome.graph;
    assert!(graph.contains("ghost"));
    assert!(graph.edges().iter().all(|edge| edge.from != "ghost"));
    assert_eq!(analysis.install_sequence(), vec!["ghost", "lib", "app"]);
}

#[test]
fn specifiers_are_normalized_before_use() {
    let index = repo(&[("app", &["lib>=1.2", " zlib ~1 "]), ("lib", &["zlib=1.3"])]);

    let outcome = build_graph("app", &index, "");
    assert_eq!(
        edges(&outcome.graph),
        vec![("app", "lib"), ("app", "zlib"), ("lib", "zlib")]
    );
}

#[test]
fn filter_matches_normalized_name_not_version_suffix() {
    let index = repo(&[("app", &["lib>=1.0-dev"]), ("lib", &[])]);

    let outcome = build_graph("app", &index, "dev");
    assert!(outcome.graph.contains("lib"));
    assert!(outcome.filtered.is_empty());
}

#[test]
fn filter_is_a_substring_match() {
    let index = repo(&[("app", &["py3-dev", "libdev", "zlib"])]);

    let outcome = build_graph("app", &index, "dev");
    assert_eq!(outcome.graph.sorted_nodes(), vec!["app", "zlib"]);
    assert_eq!(outcome.filtered.len(), 2);
}

#[test]
fn filtered_package_stays_out_even_when_reachable_another_way() {
    let index = repo(&[
        ("app", &["test-lib", "core"]),
        ("core", &["test-lib"]),
        ("test-lib", &["zlib"]),
    ]);

    let outcome = build_graph("app", &index, "test");
    assert_eq!(outcome.graph.sorted_nodes(), vec!["app", "core"]);
    assert!(!outcome.graph.contains("zlib"));
    assert_eq!(
        outcome.filtered,
        vec![
            DependencyEdge::new("app", "test-lib"),
            DependencyEdge::new("core", "test-lib"),
        ]
    );
}

#[test]
fn empty_specifiers_are_skipped() {
    let index = repo(&[("app", &["", ">=1.0", "lib"])]);

    let outcome = build_graph("app", &index, "");
    assert_eq!(edges(&outcome.graph), vec![("app", "lib")]);
}

#[test]
fn duplicate_dependencies_keep_every_edge() {
    let index = repo(&[("app", &["lib", "lib>=2"]), ("lib", &[])]);

    let outcome = build_graph("app", &index, "");
    assert_eq!(edges(&outcome.graph), vec![("app", "lib"), ("app", "lib")]);
    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.report.len(), 1);

    let order = topo_order(&outcome.graph, "app");
    assert_eq!(order.order, vec!["app", "lib"]);
    assert!(!order.is_cyclic);
}

#[test]
fn self_dependency_is_reported_but_orders_completely() {
    let index = repo(&[("app", &["app"])]);

    let outcome = build_graph("app", &index, "");
    assert!(outcome.has_back_edges());

    let order = topo_order(&outcome.graph, "app");
    assert_eq!(order.order, vec!["app"]);
    assert!(!order.is_cyclic);
}

#[test]
fn cycle_away_from_start_blocks_only_its_members() {
    let index = repo(&[
        ("app", &["lib", "zlib"]),
        ("lib", &["codec"]),
        ("codec", &["lib"]),
        ("zlib", &[]),
    ]);

    let outcome = build_graph("app", &index, "");
    assert_eq!(
        outcome.back_edges().cloned().collect::<Vec<_>>(),
        vec![ReportEntry::BackEdge {
            from: "codec".to_string(),
            to: "lib".to_string(),
        }]
    );

    let order = topo_order(&outcome.graph, "app");
    assert!(order.is_cyclic);
    assert_eq!(order.order, vec!["app", "zlib"]);
}

#[test]
fn cycle_through_start_anchors_the_order() {
    let index = repo(&[
        ("app", &["lib", "zlib"]),
        ("lib", &["plugin"]),
        ("plugin", &["app"]),
        ("zlib", &[]),
    ]);

    let outcome = build_graph("app", &index, "");
    assert_eq!(outcome.back_edges().count(), 1);

    let order = topo_order(&outcome.graph, "app");
    assert!(order.is_cyclic);
    assert_eq!(order.order, vec!["app"]);
}

#[test]
fn every_revisit_inside_a_cycle_is_a_back_edge() {
    let index = repo(&[
        ("a", &["b", "c", "d"]),
        ("b", &["c"]),
        ("c", &["b"]),
        ("d", &["c"]),
    ]);

    let outcome = build_graph("a", &index, "");
    assert_eq!(
        outcome.report,
        vec![
            ReportEntry::BackEdge {
                from: "b".to_string(),
                to: "c".to_string(),
            },
            ReportEntry::BackEdge {
                from: "c".to_string(),
                to: "b".to_string(),
            },
            ReportEntry::SharedDependency {
                from: "d".to_string(),
                to: "c".to_string(),
            },
        ]
    );
}

#[test]
fn long_chains_with_many_shared_dependencies_classify_every_revisit() {
    let depth = 20_000;
    let mut records: Vec<(String, Vec<String>)> = vec![
        ("S".to_string(), vec!["H".to_string(), "X0".to_string()]),
        ("H".to_string(), vec!["C0".to_string()]),
        (format!("C{depth}"), vec!["H".to_string()]),
    ];
    for step in 0..depth {
        records.push((format!("C{step}"), vec![format!("C{}", step + 1)]));
        records.push((
            format!("X{step}"),
            vec![format!("X{}", step + 1), "H".to_string()],
        ));
    }
    let index: RepositoryIndex = records.into_iter().collect();

    let outcome = build_graph("S", &index, "");
    assert_eq!(outcome.graph.node_count(), 2 * depth + 4);
    assert_eq!(outcome.report.len(), depth + 1);
    assert_eq!(outcome.back_edges().count(), 1);
    assert_eq!(
        outcome.report.last(),
        Some(&ReportEntry::BackEdge {
            from: format!("C{depth}"),
            to: "H".to_string(),
        })
    );
    assert!(outcome.report[..depth]
        .iter()
        .all(|entry| matches!(entry, ReportEntry::SharedDependency { to, .. } if to == "H")));
}

#[test]
fn forced_start_releases_dependents_once_ready() {
    let mut graph = DependencyGraph::new();
    graph.add_node("root");
    graph.add_edge(DependencyEdge::new("root", "start"));
    graph.add_edge(DependencyEdge::new("start", "leaf"));

    let order = topo_order(&graph, "start");
    assert_eq!(order.order, vec!["root", "start", "leaf"]);
    assert!(!order.is_cyclic);
}

#[test]
fn start_outside_graph_is_not_forced() {
    let order = topo_order(&DependencyGraph::new(), "app");
    assert!(order.is_empty());
    assert!(!order.is_cyclic);
}

#[test]
fn acyclic_orders_are_complete_and_respect_edges() {
    let index = repo(&[
        ("python3", &["busybox", "libssl1.1", "zlib", "libffi"]),
        ("busybox", &["musl", "alpine-baselayout", "libcrypto1.1"]),
        ("libssl1.1", &["libcrypto1.1", "musl"]),
        ("libcrypto1.1", &["musl"]),
        ("zlib", &["musl"]),
        ("libffi", &["musl"]),
        ("musl", &[]),
        ("alpine-baselayout", &[]),
    ]);

    for start in index.package_names() {
        let outcome = build_graph(start, &index, "");
        let order = topo_order(&outcome.graph, start);
        assert!(!order.is_cyclic, "{start} must order completely");
        assert_eq!(order.len(), outcome.graph.node_count());

        let positions: HashMap<&str, usize> = order
            .order
            .iter()
            .enumerate()
            .map(|(slot, name)| (name.as_str(), slot))
            .collect();
        for edge in outcome.graph.edges() {
            assert!(positions[edge.from.as_str()] <= positions[edge.to.as_str()]);
        }
    }
}

#[test]
fn traversal_is_deterministic() {
    let index = repo(&[
        ("app", &["b", "a", "c"]),
        ("a", &["c", "d"]),
        ("b", &["d"]),
        ("d", &["app"]),
    ]);

    let first = build_graph("app", &index, "c");
    let second = build_graph("app", &index, "c");
    assert_eq!(first.graph.nodes(), second.graph.nodes());
    assert_eq!(first.graph.edges(), second.graph.edges());
    assert_eq!(first.report, second.report);
    assert_eq!(
        topo_order(&first.graph, "app"),
        topo_order(&second.graph, "app")
    );
}

#[test]
fn lookup_closure_drives_traversal() {
    let mut calls = Vec::new();
    let outcome = build_graph_with("app", "", |name| {
        calls.push(name.to_string());
        match name {
            "app" => vec!["lib".to_string()],
            _ => Vec::new(),
        }
    });

    assert_eq!(calls, vec!["app", "lib"]);
    assert_eq!(outcome.graph.nodes(), &["app", "lib"]);
}

#[test]
fn analyze_rejects_empty_repository() {
    let err = analyze("app", &RepositoryIndex::new(), "").expect_err("must fail");
    assert_eq!(err, AnalysisError::EmptyRepository);
}

#[test]
fn analyze_rejects_unknown_start_package() {
    let index = repo(&[("app", &[])]);

    let err = analyze("missing", &index, "").expect_err("must fail");
    assert_eq!(
        err,
        AnalysisError::UnknownPackage {
            package: "missing".to_string()
        }
    );
    assert!(err.to_string().contains("missing"));
}

#[test]
fn analyze_skips_ordering_when_start_is_filtered() {
    let index = repo(&[("dev-tools", &[])]);

    let analysis = analyze("dev-tools", &index, "dev").expect("filtered start is not an error");
    assert!(analysis.loading_order.is_none());
    assert!(!analysis.is_cyclic());
    assert!(analysis.install_sequence().is_empty());
    assert_eq!(analysis.outcome.report.len(), 1);
}

#[test]
fn analyze_reports_cycles() {
    let index = repo(&[("A", &["B"]), ("B", &["A"])]);

    let analysis = analyze("A", &index, "").expect("cycle is not an error");
    assert!(analysis.is_cyclic());
    assert_eq!(analysis.install_sequence(), vec!["A"]);
}

#[test]
fn analysis_serializes_flat_report() {
    let index = repo(&[("A", &["B"]), ("B", &["A"])]);
    let analysis = analyze("A", &index, "").expect("analysis must succeed");

    let value = serde_json::to_value(&analysis).expect("analysis must serialize");
    assert_eq!(value["start"], "A");
    assert_eq!(value["graph"]["nodes"], serde_json::json!(["A", "B"]));
    assert_eq!(value["report"][0]["kind"], "back-edge");
    assert_eq!(value["loading_order"]["is_cyclic"], true);
}
