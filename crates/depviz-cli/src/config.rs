use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use depviz_registry::RepositoryMode;
use depviz_render::RendererKind;
use serde::Deserialize;

use crate::Cli;

pub(crate) const DEFAULT_REPOSITORY_URL: &str = "https://dl-cdn.alpinelinux.org/alpine/v3.18/main";
pub(crate) const DEFAULT_OUTPUT: &str = "dependency_graph.png";

/// Defaults read from `--config`. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub(crate) repo: Option<String>,
    pub(crate) mode: Option<RepositoryMode>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) filter: Option<String>,
    pub(crate) renderer: Option<RendererKind>,
}

impl ConfigFile {
    pub(crate) fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("failed to parse depviz config")
    }
}

/// Fully resolved parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) package: String,
    pub(crate) repo: String,
    pub(crate) mode: RepositoryMode,
    pub(crate) output: PathBuf,
    pub(crate) filter: String,
    pub(crate) renderer: RendererKind,
}

pub(crate) fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file: {}", path.display()))?;
    ConfigFile::from_toml_str(&content)
        .with_context(|| format!("failed parsing config file: {}", path.display()))
}

pub(crate) fn resolve_run_config(cli: &Cli, file: ConfigFile) -> Result<RunConfig> {
    let package = cli
        .package
        .clone()
        .ok_or_else(|| anyhow!("a target package is required (--package)"))?;
    if package.trim().is_empty() {
        return Err(anyhow!("target package name must not be empty"));
    }

    Ok(RunConfig {
        package,
        repo: cli
            .repo
            .clone()
            .or(file.repo)
            .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string()),
        mode: cli.mode.map(Into::into).or(file.mode).unwrap_or_default(),
        output: cli
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        filter: cli.filter.clone().or(file.filter).unwrap_or_default(),
        renderer: cli
            .renderer
            .map(Into::into)
            .or(file.renderer)
            .unwrap_or_default(),
    })
}
