use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use depviz_core::DependencyGraph;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dot::to_dot;
use crate::format::{OutputFormat, RenderTarget};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphviz executable '{tool}' was not found; install graphviz or pick another renderer")]
    ToolMissing { tool: String },
    #[error("'{tool}' failed to render {path}: status={status} stderr='{stderr}'")]
    ToolFailed {
        tool: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },
    #[error("failed writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a renderer produced. `path` is `None` when nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    pub path: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Turns a dependency graph into an artifact on disk.
pub trait GraphRenderer {
    fn name(&self) -> &'static str;

    fn render(&self, graph: &DependencyGraph, output: &Path) -> Result<RenderOutcome, RenderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    #[default]
    Graphviz,
    DotOnly,
    None,
}

impl RendererKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graphviz => "graphviz",
            Self::DotOnly => "dot-only",
            Self::None => "none",
        }
    }
}

pub fn renderer_for(kind: RendererKind) -> Box<dyn GraphRenderer> {
    match kind {
        RendererKind::Graphviz => Box::new(GraphvizRenderer::default()),
        RendererKind::DotOnly => Box::new(DotOnlyRenderer),
        RendererKind::None => Box::new(NoopRenderer),
    }
}

/// Renders through the Graphviz `dot` executable; `.dot` output is written
/// directly without it.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    executable: PathBuf,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::with_executable("dot")
    }
}

impl GraphvizRenderer {
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn name(&self) -> &'static str {
        RendererKind::Graphviz.as_str()
    }

    fn render(&self, graph: &DependencyGraph, output: &Path) -> Result<RenderOutcome, RenderError> {
        let target = RenderTarget::resolve(output);
        let description = to_dot(graph);
        if target.format == OutputFormat::Dot {
            write_file(&target.path, &description)?;
            return Ok(RenderOutcome {
                path: Some(target.path),
                format: target.format,
            });
        }

        ensure_parent(&target.path)?;
        let tool = self.executable.display().to_string();
        debug!(%tool, format = %target.format, path = %target.path.display(), "invoking graphviz");
        let mut child = Command::new(&self.executable)
            .arg(format!("-T{}", target.format.extension()))
            .arg("-o")
            .arg(&target.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    RenderError::ToolMissing { tool: tool.clone() }
                } else {
                    RenderError::Io {
                        path: self.executable.clone(),
                        source: err,
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(description.as_bytes())
                .map_err(|source| RenderError::Io {
                    path: target.path.clone(),
                    source,
                })?;
        }

        let output = child.wait_with_output().map_err(|source| RenderError::Io {
            path: target.path.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(RenderError::ToolFailed {
                tool,
                path: target.path,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(RenderOutcome {
            path: Some(target.path),
            format: target.format,
        })
    }
}

/// Writes the Graphviz description next to the requested artifact, with a
/// `.dot` extension, for hosts without Graphviz.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOnlyRenderer;

impl GraphRenderer for DotOnlyRenderer {
    fn name(&self) -> &'static str {
        RendererKind::DotOnly.as_str()
    }

    fn render(&self, graph: &DependencyGraph, output: &Path) -> Result<RenderOutcome, RenderError> {
        let path = output.with_extension(OutputFormat::Dot.extension());
        write_file(&path, &to_dot(graph))?;
        Ok(RenderOutcome {
            path: Some(path),
            format: OutputFormat::Dot,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl GraphRenderer for NoopRenderer {
    fn name(&self) -> &'static str {
        RendererKind::None.as_str()
    }

    fn render(&self, _graph: &DependencyGraph, output: &Path) -> Result<RenderOutcome, RenderError> {
        Ok(RenderOutcome {
            path: None,
            format: RenderTarget::resolve(output).format,
        })
    }
}

fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), RenderError> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
