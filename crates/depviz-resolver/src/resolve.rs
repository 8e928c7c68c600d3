use depviz_core::RepositoryIndex;
use tracing::info;

use crate::build::build_graph;
use crate::order::topo_order;
use crate::types::{Analysis, AnalysisError};

/// Builds the closure of `start` and orders it.
///
/// The repository must hold at least one record and must know `start`;
/// everything past that point is reported through the returned value.
pub fn analyze(
    start: &str,
    repo: &RepositoryIndex,
    filter: &str,
) -> Result<Analysis, AnalysisError> {
    if repo.is_empty() {
        return Err(AnalysisError::EmptyRepository);
    }
    if !repo.contains(start) {
        return Err(AnalysisError::UnknownPackage {
            package: start.to_string(),
        });
    }

    let outcome = build_graph(start, repo, filter);
    info!(
        package = start,
        nodes = outcome.graph.node_count(),
        edges = outcome.graph.edges().len(),
        findings = outcome.report.len(),
        "dependency closure built"
    );

    let loading_order = if outcome.graph.is_empty() {
        None
    } else {
        let order = topo_order(&outcome.graph, start);
        info!(
            ordered = order.len(),
            cyclic = order.is_cyclic,
            "loading order computed"
        );
        Some(order)
    };

    Ok(Analysis {
        start: start.to_string(),
        filter: filter.to_string(),
        outcome,
        loading_order,
    })
}
