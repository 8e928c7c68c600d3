mod graph;
mod index;
mod order;
mod specifier;

pub use graph::{BuildOutcome, DependencyEdge, DependencyGraph, ReportEntry};
pub use index::RepositoryIndex;
pub use order::LoadingOrder;
pub use specifier::{matches_filter, normalize_specifier, PackageName};
