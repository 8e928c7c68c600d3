use depviz_core::{BuildOutcome, LoadingOrder, PackageName};
use serde::Serialize;
use thiserror::Error;

/// Conditions that stop an analysis before any traversal happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("repository contains no package records")]
    EmptyRepository,
    #[error("package '{package}' was not found in the repository index")]
    UnknownPackage { package: PackageName },
}

/// Closure traversal plus installation order for one start package.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub start: PackageName,
    pub filter: String,
    #[serde(flatten)]
    pub outcome: BuildOutcome,
    /// Absent when the start package itself was filtered out.
    pub loading_order: Option<LoadingOrder>,
}

impl Analysis {
    pub fn is_cyclic(&self) -> bool {
        self.loading_order
            .as_ref()
            .is_some_and(|order| order.is_cyclic)
    }

    pub fn install_sequence(&self) -> Vec<PackageName> {
        self.loading_order
            .as_ref()
            .map(LoadingOrder::install_sequence)
            .unwrap_or_default()
    }
}
