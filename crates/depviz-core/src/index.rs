use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::specifier::PackageName;

/// Direct-dependency records keyed by package name.
///
/// A missing key means the package is unknown to the repository, while an
/// empty list means it is known and has no dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RepositoryIndex {
    records: BTreeMap<PackageName, Vec<String>>,
}

impl RepositoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML table of `package = ["dep", "dep>=1.0"]` entries.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let index: Self = toml::from_str(input).context("failed to parse repository index")?;
        for name in index.records.keys() {
            if name.trim().is_empty() {
                return Err(anyhow!("repository index contains an empty package name"));
            }
        }
        Ok(index)
    }

    /// Records the dependency specifiers of `package`, replacing any earlier
    /// record for the same name.
    pub fn insert<I, S>(&mut self, package: impl Into<PackageName>, specifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.insert(
            package.into(),
            specifiers.into_iter().map(Into::into).collect(),
        );
    }

    pub fn dependencies(&self, package: &str) -> Option<&[String]> {
        self.records.get(package).map(Vec::as_slice)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.records.contains_key(package)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

impl<P, I, S> FromIterator<(P, I)> for RepositoryIndex
where
    P: Into<PackageName>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (P, I)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (package, specifiers) in iter {
            index.insert(package, specifiers);
        }
        index
    }
}
