//! Human-readable terminal renderings
//!
//! Machine formats (JSON, YAML) go through the core serializers; this module
//! only produces the colored outline tree and the connection table.

use colored::{ColoredString, Colorize};
use papermap_core::text::decode_html_entities;
use papermap_core::{Connection, ConnectionType, DocumentStructure, Heading, Strength};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Numbered outline of a parsed paper.
///
/// ```text
/// Attention Is All You Need
///   by Vaswani et al.
///   source: paper.tex | format: latex | sections: 2
///
/// 1 Introduction
///     Recurrent models ...
/// 1.1 Background
/// ```
pub fn outline(doc: &DocumentStructure) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", decode_html_entities(&doc.title).bold());
    if let Some(author) = &doc.author {
        let _ = writeln!(out, "{INDENT}by {}", decode_html_entities(author));
    }
    let _ = writeln!(
        out,
        "{INDENT}{}",
        format!(
            "source: {} | format: {} | sections: {}",
            doc.source,
            doc.format,
            doc.section_count()
        )
        .dimmed()
    );
    if let Some(abstract_text) = &doc.abstract_text {
        let _ = writeln!(out, "\n{}", "Abstract".bold());
        let _ = writeln!(out, "{INDENT}{}", decode_html_entities(abstract_text));
    }

    if doc.sections.is_empty() {
        let _ = writeln!(out, "\n{}", "(no sections found)".dimmed());
        return out;
    }

    out.push('\n');
    for (i, section) in doc.sections.iter().enumerate() {
        write_heading(&mut out, section, &(i + 1).to_string(), 0);
    }
    out
}

fn write_heading(out: &mut String, heading: &Heading, number: &str, depth: usize) {
    let indent = INDENT.repeat(depth);
    let title = decode_html_entities(&heading.heading);
    let title = if depth == 0 {
        title.bold()
    } else {
        title.normal()
    };
    let _ = writeln!(out, "{indent}{} {title}", number.cyan());
    if !heading.text_excerpt.is_empty() {
        let _ = writeln!(
            out,
            "{indent}{INDENT}{INDENT}{}",
            decode_html_entities(&heading.text_excerpt).dimmed()
        );
    }
    for (i, child) in heading.children.iter().enumerate() {
        write_heading(out, child, &format!("{number}.{}", i + 1), depth + 1);
    }
}

/// Aligned connection table followed by a per-type summary.
pub fn connection_table(connections: &[Connection]) -> String {
    let mut out = String::new();
    if connections.is_empty() {
        let _ = writeln!(out, "{}", "No connections found".dimmed());
        return out;
    }

    let from_width = column_width("FROM", connections.iter().map(|c| c.from.as_str()));
    let to_width = column_width("TO", connections.iter().map(|c| c.to.as_str()));
    let type_width = "hierarchical".len();

    // Pad before colorizing so escape codes do not skew the alignment.
    let _ = writeln!(
        out,
        "{}",
        format!("{:<from_width$}  {:<to_width$}  {:<type_width$}  STRENGTH", "FROM", "TO", "TYPE")
            .bold()
    );
    for c in connections {
        let from = decode_html_entities(&c.from);
        let to = decode_html_entities(&c.to);
        let kind = kind_label(c.kind, &format!("{:<type_width$}", c.kind.as_str()));
        let _ = writeln!(
            out,
            "{from:<from_width$}  {to:<to_width$}  {kind}  {}",
            strength_label(c.strength)
        );
    }

    let count = |kind: ConnectionType| connections.iter().filter(|c| c.kind == kind).count();
    let _ = writeln!(
        out,
        "\n{} connections ({} sequential, {} hierarchical, {} semantic)",
        connections.len().to_string().bold(),
        count(ConnectionType::Sequential),
        count(ConnectionType::Hierarchical),
        count(ConnectionType::Semantic)
    );
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| decode_html_entities(v).chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn kind_label(kind: ConnectionType, padded: &str) -> ColoredString {
    match kind {
        ConnectionType::Sequential => padded.blue(),
        ConnectionType::Hierarchical => padded.magenta(),
        ConnectionType::Semantic => padded.yellow(),
    }
}

fn strength_label(strength: Strength) -> ColoredString {
    match strength {
        Strength::Strong => strength.as_str().green(),
        Strength::Medium => strength.as_str().normal(),
        Strength::Weak => strength.as_str().dimmed(),
    }
}
