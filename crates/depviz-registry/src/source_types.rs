use std::fmt;
use std::path::Path;
use serde::{Deserialize, Serialize};

/// Where a repository index comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryMode {
    /// The built-in static table; the location is informational only.
    #[default]
    Remote,
    /// A repository file on the local filesystem.
    Local,
}

impl RepositoryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for RepositoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk layout of a local repository file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFileFormat {
    /// `PACKAGE: DEP1, DEP2` lines.
    Lines,
    /// A TOML table of `package = ["dep", ...]`.
    Toml,
}

impl LocalFileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Lines,
        }
    }
}
