use std::process::ExitCode;

use anyhow::{Context, Result};
use depviz_registry::RepositorySource;
use depviz_render::{renderer_for, RenderOutcome};
use depviz_resolver::{analyze, Analysis, AnalysisError};
use serde::Serialize;
use tracing::{info, warn};

use crate::completion::write_completions_script;
use crate::config::{load_config_file, resolve_run_config, ConfigFile, RunConfig};
use crate::render::{
    format_config_lines, format_order_lines, format_traversal_lines, render_status_line,
    resolve_output_style, OutputStyle, TerminalRenderer,
};
use crate::Cli;

pub(crate) const UNKNOWN_PACKAGE_EXIT: u8 = 2;

/// How the graph artifact step ended. Failures never abort the run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub(crate) enum RenderStatus {
    Skipped,
    Written(RenderOutcome),
    Failed { reason: String },
}

/// Document printed by `--json`: the analysis plus the rendering result.
#[derive(Debug, Serialize)]
pub(crate) struct JsonReport<'a> {
    #[serde(flatten)]
    pub(crate) analysis: &'a Analysis,
    pub(crate) rendering: &'a RenderStatus,
}

pub(crate) fn run_cli(cli: Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        let mut stdout = std::io::stdout().lock();
        write_completions_script(shell, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let file = match cli.config.as_deref() {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };
    let config = resolve_run_config(&cli, file)?;
    let style = resolve_output_style(cli.output_style);
    let terminal = TerminalRenderer::from_style(style);

    if !cli.json {
        terminal.print_section("configuration");
        terminal.print_lines(&format_config_lines(&config));
    }

    let source = RepositorySource::open(config.mode, config.repo.clone());
    info!(source = %source.describe(), "loading repository");
    let index = source
        .load()
        .with_context(|| format!("failed loading {}", source.describe()))?;

    let analysis = match analyze(&config.package, &index, &config.filter) {
        Ok(analysis) => analysis,
        Err(err) => return Ok(report_analysis_error(style, &source, &err)),
    };

    let rendering = render_graph_best_effort(&config, &analysis);
    if cli.json {
        let report = JsonReport {
            analysis: &analysis,
            rendering: &rendering,
        };
        let rendered = serde_json::to_string_pretty(&report)
            .context("failed to serialize analysis as JSON")?;
        println!("{rendered}");
        return Ok(ExitCode::SUCCESS);
    }

    print_analysis(terminal, &analysis);
    print_render_status(terminal, &rendering);
    Ok(ExitCode::SUCCESS)
}

fn report_analysis_error(
    style: OutputStyle,
    source: &RepositorySource,
    err: &AnalysisError,
) -> ExitCode {
    match err {
        AnalysisError::EmptyRepository => {
            let message = format!("{err}: nothing usable in {}", source.describe());
            eprintln!("{}", render_status_line(style, "warn", &message));
            ExitCode::SUCCESS
        }
        AnalysisError::UnknownPackage { .. } => {
            eprintln!("{}", render_status_line(style, "error", &err.to_string()));
            ExitCode::from(UNKNOWN_PACKAGE_EXIT)
        }
    }
}

pub(crate) fn render_graph_best_effort(config: &RunConfig, analysis: &Analysis) -> RenderStatus {
    let graph = &analysis.outcome.graph;
    if graph.edges().is_empty() {
        return RenderStatus::Skipped;
    }

    let renderer = renderer_for(config.renderer);
    match renderer.render(graph, &config.output) {
        Ok(outcome) => {
            info!(renderer = renderer.name(), path = ?outcome.path, "graph rendered");
            RenderStatus::Written(outcome)
        }
        Err(err) => {
            warn!(renderer = renderer.name(), error = %err, "graph rendering failed");
            RenderStatus::Failed {
                reason: err.to_string(),
            }
        }
    }
}

fn print_analysis(terminal: TerminalRenderer, analysis: &Analysis) {
    terminal.print_section("dependency closure");
    terminal.print_lines(&format_traversal_lines(analysis));

    if analysis.outcome.graph.is_empty() {
        terminal.print_status("warn", "graph is empty; nothing to order");
        return;
    }

    terminal.print_section("install order");
    terminal.print_lines(&format_order_lines(analysis));
}

fn print_render_status(terminal: TerminalRenderer, rendering: &RenderStatus) {
    terminal.print_section("graph");
    match rendering {
        RenderStatus::Skipped => {
            terminal.print_status("info", "graph has no edges; nothing rendered");
        }
        RenderStatus::Written(RenderOutcome {
            path: Some(path), ..
        }) => {
            terminal.print_status("ok", &format!("graph written to {}", path.display()));
        }
        RenderStatus::Written(RenderOutcome { path: None, .. }) => {
            terminal.print_status("info", "rendering disabled");
        }
        RenderStatus::Failed { reason } => {
            terminal.print_status("warn", &format!("graph rendering failed: {reason}"));
        }
    }
}
