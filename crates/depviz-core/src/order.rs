use serde::Serialize;

use crate::specifier::PackageName;

/// Output of the in-degree elimination sort.
///
/// `order` follows edge direction: a package precedes the packages it depends
/// on. When `is_cyclic` is set, `order` is a strict prefix of the node set and
/// the missing packages sit on a cycle or behind one.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LoadingOrder {
    pub order: Vec<PackageName>,
    pub is_cyclic: bool,
}

impl LoadingOrder {
    /// Dependencies first, dependents last: the sequence to install in.
    pub fn install_sequence(&self) -> Vec<PackageName> {
        self.order.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
