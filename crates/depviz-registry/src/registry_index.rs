use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use depviz_core::RepositoryIndex;
use tracing::{debug, warn};

use crate::mock_index::alpine_mock_index;
use crate::source_types::{LocalFileFormat, RepositoryMode};

/// A repository provenance, resolved from the user's mode and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    Static { location: String },
    LocalFile { path: PathBuf },
}

impl RepositorySource {
    pub fn open(mode: RepositoryMode, location: impl Into<String>) -> Self {
        let location = location.into();
        match mode {
            RepositoryMode::Remote => Self::Static { location },
            RepositoryMode::Local => Self::LocalFile {
                path: PathBuf::from(location),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Static { location } => format!("built-in package table (location: {location})"),
            Self::LocalFile { path } => format!("local repository file {}", path.display()),
        }
    }

    /// Loads the index. A missing local file yields an empty index; any other
    /// read or parse failure is an error.
    pub fn load(&self) -> Result<RepositoryIndex> {
        match self {
            Self::Static { location } => {
                debug!(%location, "serving built-in package table");
                Ok(alpine_mock_index())
            }
            Self::LocalFile { path } => load_local_repository(path),
        }
    }
}

pub fn load_local_repository(path: &Path) -> Result<RepositoryIndex> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "repository file not found");
            return Ok(RepositoryIndex::new());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed reading repository file: {}", path.display())
            });
        }
    };

    let index = match LocalFileFormat::from_path(path) {
        LocalFileFormat::Toml => RepositoryIndex::from_toml_str(&content)
            .with_context(|| format!("failed parsing repository file: {}", path.display()))?,
        LocalFileFormat::Lines => parse_line_index(&content),
    };
    debug!(path = %path.display(), packages = index.len(), "loaded local repository");
    Ok(index)
}

/// Parses `PACKAGE: DEP1, DEP2` records.
///
/// Blank lines and `#` comments are skipped, as are lines without a colon or
/// with an empty package name. Empty dependency entries are dropped, so
/// `musl:` declares a package with no dependencies. A repeated package line
/// replaces the earlier one.
pub fn parse_line_index(content: &str) -> RepositoryIndex {
    let mut index = RepositoryIndex::new();
    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((package, deps)) = line.split_once(':') else {
            debug!(line = line_no + 1, "skipping repository line without ':'");
            continue;
        };
        let package = package.trim();
        if package.is_empty() {
            debug!(line = line_no + 1, "skipping repository line without a package name");
            continue;
        }

        let deps = deps
            .split(',')
            .map(str::trim)
            .filter(|dep| !dep.is_empty());
        index.insert(package, deps);
    }
    index
}
