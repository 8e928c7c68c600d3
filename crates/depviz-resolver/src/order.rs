use std::collections::{HashMap, HashSet, VecDeque};

use depviz_core::{DependencyGraph, LoadingOrder};
use tracing::{debug, trace};

/// Kahn's in-degree elimination over `graph`.
///
/// Zero in-degree nodes are seeded in discovery order. `start` is always
/// seeded, even with unmet in-degree, so a cyclic closure still yields a
/// start-anchored prefix. A node emitted that way does not release its
/// dependencies until its own in-degree drops to zero, which keeps cycle
/// members and everything behind them out of the order.
pub fn topo_order(graph: &DependencyGraph, start: &str) -> LoadingOrder {
    let mut in_degree: HashMap<&str, usize> = graph
        .nodes()
        .iter()
        .map(|name| (name.as_str(), 0))
        .collect();
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

    for edge in graph.edges() {
        adjacency
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        if let Some(degree) = in_degree.get_mut(edge.to.as_str()) {
            *degree += 1;
        }
    }

    let mut queue: VecDeque<&str> = graph
        .nodes()
        .iter()
        .map(String::as_str)
        .filter(|name| in_degree.get(name) == Some(&0))
        .collect();
    if graph.contains(start) && !queue.contains(&start) {
        debug!(package = start, "seeding start package with unmet in-degree");
        queue.push_back(start);
    }

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut released: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();

    while let Some(next) = queue.pop_front() {
        if emitted.insert(next) {
            order.push(next.to_string());
        }
        let ready = in_degree.get(next).map_or(true, |degree| *degree == 0);
        if !ready || !released.insert(next) {
            trace!(package = next, "holding dependents of package");
            continue;
        }

        for &target in adjacency.get(next).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(target) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(target);
                }
            }
        }
    }

    let is_cyclic = order.len() < graph.node_count();
    if is_cyclic {
        let blocked = graph
            .nodes()
            .iter()
            .filter(|name| !emitted.contains(name.as_str()))
            .cloned()
            .collect::<Vec<_>>();
        debug!(blocked = %blocked.join(", "), "ordering stopped at a cycle");
    }

    LoadingOrder { order, is_cyclic }
}
