//! Interconnection inference between the sections of one paper
//!
//! Three rule families run for every top-level heading, in document order:
//!
//! 1. **Sequential**: each top-level heading links to the next one
//! 2. **Hierarchical**: each heading links to its direct children, down to
//!    subsubsections
//! 3. **Semantic**: keyword rules over heading text ([`SEMANTIC_RULES`])
//!
//! The combined list is then deduplicated by `(from, to, type)`.

use log::debug;
use papermap_core::{
    Connection, ConnectionReport, ConnectionType, DocumentStructure, Heading, Strength,
};
use std::collections::HashSet;

/// A keyword-driven link between two kinds of section.
///
/// A heading whose lowercased text contains any `from_keywords` entry links
/// to every heading containing any `to_keywords` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticRule {
    /// Short identifier, used in logs and tests
    pub name: &'static str,
    pub from_keywords: &'static [&'static str],
    pub to_keywords: &'static [&'static str],
    pub strength: Strength,
}

impl SemanticRule {
    #[inline]
    fn matches_from(&self, heading: &str) -> bool {
        contains_any(heading, self.from_keywords)
    }

    #[inline]
    fn matches_to(&self, heading: &str) -> bool {
        contains_any(heading, self.to_keywords)
    }
}

const METHOD_KEYWORDS: &[&str] = &["method", "approach", "algorithm", "proposed"];

/// Semantic rules in evaluation order.
pub static SEMANTIC_RULES: &[SemanticRule] = &[
    SemanticRule {
        name: "introduction_to_method",
        from_keywords: &["introduction"],
        to_keywords: METHOD_KEYWORDS,
        strength: Strength::Medium,
    },
    SemanticRule {
        name: "method_to_results",
        from_keywords: METHOD_KEYWORDS,
        to_keywords: &["result", "experiment", "evaluation", "performance"],
        strength: Strength::Medium,
    },
    SemanticRule {
        name: "results_to_discussion",
        from_keywords: &["result", "experiment", "evaluation"],
        to_keywords: &["discussion", "conclusion", "future"],
        strength: Strength::Medium,
    },
    SemanticRule {
        name: "related_work_to_context",
        from_keywords: &["related", "previous", "literature"],
        to_keywords: &["introduction", "method", "approach"],
        strength: Strength::Weak,
    },
];

/// Derive the connection list for one structure.
///
/// Deterministic for a given input; an empty structure yields an empty list.
/// Semantic rules compare top-level headings against all top-level headings,
/// the heading itself included, so self-loops can occur.
#[must_use]
pub fn analyze_connections(structure: &DocumentStructure) -> Vec<Connection> {
    let sections = &structure.sections;
    let lowered: Vec<String> = sections.iter().map(|s| s.heading.to_lowercase()).collect();
    let mut connections = Vec::new();

    for (i, section) in sections.iter().enumerate() {
        if let Some(next) = sections.get(i + 1) {
            connections.push(Connection::new(
                &section.heading,
                &next.heading,
                ConnectionType::Sequential,
                Strength::Strong,
            ));
        }

        push_hierarchical(section, &mut connections);

        for rule in SEMANTIC_RULES {
            if !rule.matches_from(&lowered[i]) {
                continue;
            }
            for (target, target_lower) in sections.iter().zip(&lowered) {
                if rule.matches_to(target_lower) {
                    connections.push(Connection::new(
                        &section.heading,
                        &target.heading,
                        ConnectionType::Semantic,
                        rule.strength,
                    ));
                }
            }
        }
    }

    let total = connections.len();
    let connections = dedup_connections(connections);
    debug!(
        "Analyzed {} sections: {} connections ({} duplicates removed)",
        sections.len(),
        connections.len(),
        total - connections.len()
    );
    connections
}

/// Analyze and wrap the result with its count.
#[must_use]
pub fn analyze_report(structure: &DocumentStructure) -> ConnectionReport {
    ConnectionReport::from(analyze_connections(structure))
}

/// Section to each subsection, subsection to each subsubsection.
///
/// Only children exactly one level below their parent count, so `\paragraph`
/// leaves (level 4) never receive hierarchical edges.
fn push_hierarchical(section: &Heading, connections: &mut Vec<Connection>) {
    for sub in direct_children(section) {
        connections.push(Connection::new(
            &section.heading,
            &sub.heading,
            ConnectionType::Hierarchical,
            Strength::Strong,
        ));
    }
    for sub in direct_children(section) {
        for subsub in direct_children(sub) {
            connections.push(Connection::new(
                &sub.heading,
                &subsub.heading,
                ConnectionType::Hierarchical,
                Strength::Strong,
            ));
        }
    }
}

fn direct_children(parent: &Heading) -> impl Iterator<Item = &Heading> {
    parent
        .children
        .iter()
        .filter(move |child| child.level == parent.level.saturating_add(1))
}

/// Drop repeated `(from, to, type)` triples, keeping the first occurrence.
#[must_use]
pub fn dedup_connections(connections: Vec<Connection>) -> Vec<Connection> {
    let mut seen = HashSet::with_capacity(connections.len());
    connections
        .into_iter()
        .filter(|c| seen.insert((c.from.clone(), c.to.clone(), c.kind)))
        .collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
