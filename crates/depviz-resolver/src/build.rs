use std::collections::{HashMap, HashSet, VecDeque};

use depviz_core::{
    matches_filter, normalize_specifier, BuildOutcome, DependencyEdge, DependencyGraph,
    PackageName, RepositoryIndex, ReportEntry,
};
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, trace};

/// Breadth-first closure of `start` over `repo`, skipping every dependency
/// whose normalized name contains `filter`.
///
/// Packages missing from `repo` are leaves. Each package is expanded at most
/// once, so the walk terminates on cyclic input.
pub fn build_graph(start: &str, repo: &RepositoryIndex, filter: &str) -> BuildOutcome {
    build_graph_with(start, filter, |name| {
        repo.dependencies(name).map(<[String]>::to_vec).unwrap_or_default()
    })
}

/// Same traversal as [`build_graph`], with dependency specifiers supplied by
/// `lookup` instead of an index.
pub fn build_graph_with<F>(start: &str, filter: &str, mut lookup: F) -> BuildOutcome
where
    F: FnMut(&str) -> Vec<String>,
{
    let mut outcome = BuildOutcome::default();
    if matches_filter(start, filter) {
        debug!(package = start, filter, "start package excluded by filter");
        outcome.report.push(ReportEntry::StartFiltered {
            package: start.to_string(),
            filter: filter.to_string(),
        });
        return outcome;
    }

    let mut queue: VecDeque<PackageName> = VecDeque::from([start.to_string()]);
    let mut visited: HashSet<PackageName> = HashSet::from([start.to_string()]);
    let mut revisits: Vec<DependencyEdge> = Vec::new();
    outcome.graph.add_node(start);

    while let Some(current) = queue.pop_front() {
        let specifiers = lookup(&current);
        trace!(package = %current, dependencies = specifiers.len(), "expanding package");

        for spec in specifiers {
            let dep = normalize_specifier(&spec);
            if dep.is_empty() {
                debug!(package = %current, specifier = %spec, "skipping specifier without a package name");
                continue;
            }
            if matches_filter(&dep, filter) {
                debug!(package = %current, dependency = %dep, filter, "dependency excluded by filter");
                outcome.filtered.push(DependencyEdge::new(current.as_str(), dep));
                continue;
            }

            let edge = DependencyEdge::new(current.as_str(), dep.as_str());
            if visited.contains(&dep) {
                revisits.push(edge.clone());
            } else {
                visited.insert(dep.clone());
                queue.push_back(dep);
            }
            outcome.graph.add_edge(edge);
        }
    }

    outcome.report = classify_revisits(&outcome.graph, revisits);
    outcome
}

/// Labels every edge that reached an already visited package. The edge closes
/// a cycle exactly when both ends share a strongly connected component of the
/// finished graph; otherwise it is a convergent dependency.
fn classify_revisits(graph: &DependencyGraph, revisits: Vec<DependencyEdge>) -> Vec<ReportEntry> {
    if revisits.is_empty() {
        return Vec::new();
    }

    let components = component_labels(graph);
    revisits
        .into_iter()
        .map(|DependencyEdge { from, to }| {
            let same_component =
                match (components.get(from.as_str()), components.get(to.as_str())) {
                    (Some(left), Some(right)) => left == right,
                    _ => false,
                };
            if same_component {
                debug!(%from, %to, "back edge closes a cycle");
                ReportEntry::BackEdge { from, to }
            } else {
                trace!(%from, %to, "dependency already visited");
                ReportEntry::SharedDependency { from, to }
            }
        })
        .collect()
}

fn component_labels(graph: &DependencyGraph) -> HashMap<&str, usize> {
    let mut digraph: DiGraph<&str, ()> =
        DiGraph::with_capacity(graph.node_count(), graph.edges().len());
    let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        indices.insert(node.as_str(), digraph.add_node(node.as_str()));
    }
    for edge in graph.edges() {
        if let (Some(&from), Some(&to)) =
            (indices.get(edge.from.as_str()), indices.get(edge.to.as_str()))
        {
            digraph.add_edge(from, to, ());
        }
    }

    let mut labels = HashMap::with_capacity(graph.node_count());
    for (component, members) in kosaraju_scc(&digraph).into_iter().enumerate() {
        for member in members {
            labels.insert(digraph[member], component);
        }
    }
    labels
}
