use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use depviz_resolver::Analysis;

use crate::config::RunConfig;
use crate::CliOutputStyle;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum UiMode {
    Plain,
    Interactive,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
    mode: UiMode,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self {
            style,
            mode: ui_mode_from_style(style),
        }
    }

    pub(crate) fn print_status(self, status: &str, message: &str) {
        println!("{}", render_status_line(self.style, status, message));
    }

    pub(crate) fn print_section(self, title: &str) {
        let line = render_section_header(self.mode, title);
        let rendered = match self.style {
            OutputStyle::Plain => line,
            OutputStyle::Rich => colorize(section_style(), &line),
        };
        println!();
        println!("{rendered}");
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }
}

pub(crate) fn resolve_output_style(requested: CliOutputStyle) -> OutputStyle {
    match requested {
        CliOutputStyle::Plain => OutputStyle::Plain,
        CliOutputStyle::Rich => OutputStyle::Rich,
        CliOutputStyle::Auto => {
            if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
                OutputStyle::Rich
            } else {
                OutputStyle::Plain
            }
        }
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => {
            let badge = format!("[{}]", status.to_ascii_uppercase());
            format!("{} {message}", colorize(status_style(status), &badge))
        }
    }
}

pub(crate) fn format_config_lines(config: &RunConfig) -> Vec<String> {
    vec![
        format!("package: {}", config.package),
        format!("repository: {}", config.repo),
        format!("mode: {}", config.mode),
        format!("output: {}", config.output.display()),
        format!("filter: '{}'", config.filter),
        format!("renderer: {}", config.renderer.as_str()),
    ]
}

pub(crate) fn format_traversal_lines(analysis: &Analysis) -> Vec<String> {
    let graph = &analysis.outcome.graph;
    let mut lines = vec![format!(
        "nodes ({}): {}",
        graph.node_count(),
        graph.sorted_nodes().join(", ")
    )];

    let edges = graph
        .edges()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    lines.push(format!("edges ({}): {}", edges.len(), edges.join(", ")));

    for skipped in &analysis.outcome.filtered {
        lines.push(format!(
            "filtered: {skipped} (contains '{}')",
            analysis.filter
        ));
    }
    for entry in &analysis.outcome.report {
        lines.push(format!("- {entry}"));
    }
    if analysis.outcome.has_back_edges() {
        lines.push(format!(
            "cycles: {} back edge(s) found",
            analysis.outcome.back_edges().count()
        ));
    }
    lines
}

pub(crate) fn format_order_lines(analysis: &Analysis) -> Vec<String> {
    let order = match &analysis.loading_order {
        Some(order) if !order.is_empty() => order,
        _ => return vec!["nothing to install".to_string()],
    };

    let mut lines = Vec::new();
    if analysis.is_cyclic() {
        lines.push(format!(
            "cycle detected: only {} of {} packages could be ordered; the rest sit on a cycle or depend on one",
            order.len(),
            analysis.outcome.graph.node_count()
        ));
    }

    let sequence = analysis.install_sequence();
    if sequence.len() == 1 && sequence[0] == analysis.start && !analysis.is_cyclic() {
        lines.push(format!(
            "package '{}' has no dependencies to install",
            analysis.start
        ));
    }

    lines.push(sequence.join(" -> "));
    for (step, package) in sequence.iter().enumerate() {
        let marker = if *package == analysis.start {
            " (requested)"
        } else {
            ""
        };
        lines.push(format!("{:>3}. install {package}{marker}", step + 1));
    }
    lines
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "ok" => AnsiColor::BrightGreen,
        "warn" => AnsiColor::BrightYellow,
        "error" => AnsiColor::BrightRed,
        _ => AnsiColor::BrightCyan,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn ui_mode_from_style(style: OutputStyle) -> UiMode {
    match style {
        OutputStyle::Plain => UiMode::Plain,
        OutputStyle::Rich => UiMode::Interactive,
    }
}

fn render_section_header(mode: UiMode, title: &str) -> String {
    match mode {
        UiMode::Plain => format!("{title}:"),
        UiMode::Interactive => format!("== {title} =="),
    }
}
