//! JSON and YAML serialization for structure and connection reports
//!
//! Every record already implements `Serialize`; these wrappers fix the
//! formatting options and map failures into [`PaperMapError`](crate::PaperMapError).

use crate::error::Result;
use serde::Serialize;

/// JSON serializer for papermap records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSerializer {
    /// Pretty-printed JSON (the default)
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line JSON
    #[inline]
    #[must_use = "creates compact serializer"]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Whether output is indented
    #[inline]
    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Serialize any record to JSON.
    ///
    /// # Errors
    /// Returns [`PaperMapError::JsonError`](crate::PaperMapError::JsonError)
    /// if serialization fails.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// YAML serializer for papermap records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YamlSerializer;

impl YamlSerializer {
    /// Create a new YAML serializer
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub const fn new() -> Self {
        Self
    }

    /// Serialize any record to YAML.
    ///
    /// # Errors
    /// Returns [`PaperMapError::YamlError`](crate::PaperMapError::YamlError)
    /// if serialization fails.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_yaml::to_string(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Connection, ConnectionReport, ConnectionType, DocumentStructure, Heading, PaperFormat,
        Strength,
    };

    fn report() -> ConnectionReport {
        ConnectionReport::from(vec![Connection::new(
            "Introduction",
            "Method",
            ConnectionType::Sequential,
            Strength::Strong,
        )])
    }

    #[test]
    fn test_json_pretty_vs_compact() {
        let pretty = JsonSerializer::new().serialize(&report()).unwrap();
        let compact = JsonSerializer::compact().serialize(&report()).unwrap();
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
        assert!(compact.contains(r#""type":"sequential""#));
        assert!(JsonSerializer::default().is_pretty());
    }

    #[test]
    fn test_yaml_structure_keys() {
        let mut doc = DocumentStructure::new("paper.md", PaperFormat::Markdown);
        doc.sections.push(Heading::new(1, "Intro", "text", 0));
        let yaml = YamlSerializer::new().serialize(&doc.into_report()).unwrap();
        assert!(yaml.contains("format: markdown"));
        assert!(yaml.contains("section_count: 1"));
        assert!(yaml.contains("heading: Intro"));
    }

    #[test]
    fn test_json_round_trip_report() {
        let json = JsonSerializer::compact().serialize(&report()).unwrap();
        let back: ConnectionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report());
    }
}
