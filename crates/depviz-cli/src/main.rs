use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use depviz_registry::RepositoryMode;
use depviz_render::RendererKind;

mod completion;
mod config;
mod dispatch;
mod render;

#[derive(Parser, Debug)]
#[command(name = "depviz")]
#[command(
    about = "Dependency closure, install order and graph rendering for package repositories",
    long_about = None
)]
struct Cli {
    /// Package whose dependency closure is analyzed.
    #[arg(short = 'p', long = "package", required_unless_present = "completions")]
    package: Option<String>,
    /// Repository URL (remote) or path to a repository file (local).
    #[arg(short = 'r', long = "repo")]
    repo: Option<String>,
    #[arg(short = 'm', long = "mode", value_enum)]
    mode: Option<CliRepositoryMode>,
    /// Graph artifact to write; the extension selects png, svg, pdf or dot.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    /// Skip every dependency whose name contains this substring.
    #[arg(short = 'f', long = "filter")]
    filter: Option<String>,
    #[arg(long, value_enum)]
    renderer: Option<CliRendererKind>,
    /// TOML file with defaults for repo, mode, output, filter and renderer.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = CliOutputStyle::Auto)]
    output_style: CliOutputStyle,
    /// Print the analysis as JSON instead of text.
    #[arg(long)]
    json: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print a completion script for SHELL and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<CliCompletionShell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliRepositoryMode {
    Remote,
    Local,
}

impl From<CliRepositoryMode> for RepositoryMode {
    fn from(value: CliRepositoryMode) -> Self {
        match value {
            CliRepositoryMode::Remote => RepositoryMode::Remote,
            CliRepositoryMode::Local => RepositoryMode::Local,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliRendererKind {
    Graphviz,
    DotOnly,
    None,
}

impl From<CliRendererKind> for RendererKind {
    fn from(value: CliRendererKind) -> Self {
        match value {
            CliRendererKind::Graphviz => RendererKind::Graphviz,
            CliRendererKind::DotOnly => RendererKind::DotOnly,
            CliRendererKind::None => RendererKind::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliOutputStyle {
    Auto,
    Plain,
    Rich,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliCompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dispatch::run_cli(cli)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
