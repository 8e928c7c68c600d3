mod build;
mod order;
mod resolve;
mod types;

pub use build::{build_graph, build_graph_with};
pub use order::topo_order;
pub use resolve::analyze;
pub use types::{Analysis, AnalysisError};

#[cfg(test)]
mod tests;
