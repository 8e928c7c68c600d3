use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::specifier::PackageName;

/// A recorded dependency: `from` needs `to`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub from: PackageName,
    pub to: PackageName,
}

impl DependencyEdge {
    pub fn new(from: impl Into<PackageName>, to: impl Into<PackageName>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Nodes in discovery order plus every accepted edge in discovery order.
///
/// Edges may repeat when a package lists the same dependency twice. Adding an
/// edge also adds its target as a node, so every edge target is a node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    nodes: Vec<PackageName>,
    edges: Vec<DependencyEdge>,
    #[serde(skip)]
    members: HashSet<PackageName>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` to the node set. Returns false if it was already present.
    pub fn add_node(&mut self, name: &str) -> bool {
        if self.members.contains(name) {
            return false;
        }
        self.members.insert(name.to_string());
        self.nodes.push(name.to_string());
        true
    }

    pub fn add_edge(&mut self, edge: DependencyEdge) {
        self.add_node(&edge.to);
        self.edges.push(edge);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn nodes(&self) -> &[PackageName] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node names in lexical order, for stable display.
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// One traversal finding worth surfacing to the user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReportEntry {
    /// The start package matched the exclusion filter; nothing was traversed.
    StartFiltered { package: PackageName, filter: String },
    /// The edge reaches an already visited package that can reach `from`
    /// back, so both ends sit on one cycle.
    BackEdge { from: PackageName, to: PackageName },
    /// The edge reaches an already visited package with no path back to
    /// `from` (diamond or convergent dependency).
    SharedDependency { from: PackageName, to: PackageName },
}

impl ReportEntry {
    pub fn is_back_edge(&self) -> bool {
        matches!(self, Self::BackEdge { .. })
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartFiltered { package, filter } => write!(
                f,
                "start package '{package}' is excluded by filter '{filter}'"
            ),
            Self::BackEdge { from, to } => write!(f, "back edge (cycle): {from} -> {to}"),
            Self::SharedDependency { from, to } => {
                write!(f, "shared dependency: {from} -> {to}")
            }
        }
    }
}

/// Result of a closure traversal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    pub report: Vec<ReportEntry>,
    /// Dependencies rejected by the filter, as `from -> dependency` pairs.
    pub filtered: Vec<DependencyEdge>,
}

impl BuildOutcome {
    pub fn back_edges(&self) -> impl Iterator<Item = &ReportEntry> {
        self.report.iter().filter(|entry| entry.is_back_edge())
    }

    pub fn has_back_edges(&self) -> bool {
        self.report.iter().any(ReportEntry::is_back_edge)
    }
}
