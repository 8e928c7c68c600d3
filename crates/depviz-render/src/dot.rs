use std::fmt::Write;

use depviz_core::DependencyGraph;

/// Graphviz description of `graph`, laid out left to right. Every recorded
/// edge gets its own statement, so duplicate dependencies stay visible.
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut out = String::from("digraph dependencies {\n    rankdir=LR;\n");
    for node in graph.nodes() {
        let _ = writeln!(out, "    {};", quote_id(node));
    }
    for edge in graph.edges() {
        let _ = writeln!(out, "    {} -> {};", quote_id(&edge.from), quote_id(&edge.to));
    }
    out.push_str("}\n");
    out
}

fn quote_id(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for ch in id.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
