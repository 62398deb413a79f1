//! Inferred relationships between headings
//!
//! Connections are derived values: they exist only as the output of one
//! analysis run over one [`DocumentStructure`](crate::DocumentStructure) and
//! refer to headings by their display text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of relationship between two headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Reading order between consecutive top-level sections.
    Sequential,
    /// Parent to direct child.
    Hierarchical,
    /// Keyword-driven topical link.
    Semantic,
}

impl ConnectionType {
    /// Lowercase label used in reports.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Hierarchical => "hierarchical",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative strength label, fixed per inference rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Structural certainty (order, containment).
    Strong,
    /// Typical argument flow between topics.
    Medium,
    /// Loose topical association.
    Weak,
}

impl Strength {
    /// Lowercase label used in reports.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge between two headings, identified by heading text.
///
/// Two headings with identical text cannot be told apart here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Heading text of the source node.
    pub from: String,
    /// Heading text of the target node.
    pub to: String,
    /// Relationship kind.
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    /// Qualitative strength of the rule that produced this edge.
    pub strength: Strength,
}

impl Connection {
    /// Create a connection.
    #[inline]
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: ConnectionType,
        strength: Strength,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            strength,
        }
    }

    /// Deduplication key: `(from, to, type)`. Strength is not part of it.
    #[inline]
    #[must_use]
    pub fn key(&self) -> (&str, &str, ConnectionType) {
        (self.from.as_str(), self.to.as_str(), self.kind)
    }

    /// True when the edge points back at its own source.
    #[inline]
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Serializable hand-off record for a connection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    /// Deduplicated edges in first-occurrence order.
    pub connections: Vec<Connection>,
    /// Always equal to `connections.len()`.
    pub connection_count: usize,
}

impl From<Vec<Connection>> for ConnectionReport {
    fn from(connections: Vec<Connection>) -> Self {
        Self {
            connection_count: connections.len(),
            connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_serializes_type_and_strength_lowercase() {
        let conn = Connection::new(
            "Introduction",
            "Methods",
            ConnectionType::Semantic,
            Strength::Medium,
        );
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["from"], "Introduction");
        assert_eq!(json["to"], "Methods");
        assert_eq!(json["type"], "semantic");
        assert_eq!(json["strength"], "medium");
    }

    #[test]
    fn test_key_ignores_strength() {
        let a = Connection::new("A", "B", ConnectionType::Semantic, Strength::Medium);
        let b = Connection::new("A", "B", ConnectionType::Semantic, Strength::Weak);
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_self_loop() {
        let conn = Connection::new("Methods", "Methods", ConnectionType::Semantic, Strength::Weak);
        assert!(conn.is_self_loop());
    }

    #[test]
    fn test_report_counts() {
        let report = ConnectionReport::from(vec![
            Connection::new("A", "B", ConnectionType::Sequential, Strength::Strong),
            Connection::new("A", "A1", ConnectionType::Hierarchical, Strength::Strong),
        ]);
        assert_eq!(report.connection_count, 2);

        let empty = ConnectionReport::from(Vec::new());
        assert_eq!(empty.connection_count, 0);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ConnectionType::Hierarchical.to_string(), "hierarchical");
        assert_eq!(Strength::Weak.to_string(), "weak");
    }
}
