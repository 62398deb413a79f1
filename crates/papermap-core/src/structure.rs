//! Paper structure records
//!
//! A parsed paper is a [`DocumentStructure`]: metadata plus an ordered tree of
//! [`Heading`] nodes. Order is document order and encodes reading sequence.

use crate::format::PaperFormat;
use serde::{Deserialize, Serialize};

/// Title used when the source declares none.
pub const DEFAULT_TITLE: &str = "Untitled Paper";

/// Source identifier for content handed over in memory rather than read from a path.
pub const INLINE_SOURCE: &str = "provided_content";

/// One structural node: section, subsection, subsubsection or paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Nesting level, 1 for top-level sections.
    ///
    /// LaTeX `\paragraph` is always level 4, wherever it is attached.
    pub level: u8,

    /// Cleaned, HTML-safe display text.
    pub heading: String,

    /// Normalized plain text following the heading, truncated with `...`.
    pub text_excerpt: String,

    /// Byte offset of the heading in the source. Only meaningful for ordering.
    pub position: usize,

    /// Direct children in document order (empty, never absent).
    #[serde(default)]
    pub children: Vec<Heading>,
}

impl Heading {
    /// Create a heading without children.
    #[inline]
    #[must_use]
    pub fn new(
        level: u8,
        heading: impl Into<String>,
        text_excerpt: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            level,
            heading: heading.into(),
            text_excerpt: text_excerpt.into(),
            position,
            children: Vec::new(),
        }
    }

    /// Builder-style variant of pushing children, mostly for tests and fixtures.
    #[inline]
    #[must_use = "returns the heading with children attached"]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// True when the heading has no children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of headings in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    fn collect_preorder<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a Self)>) {
        out.push((depth, self));
        for child in &self.children {
            child.collect_preorder(depth + 1, out);
        }
    }
}

/// Parsed structure of one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Origin of the content: a path, or [`INLINE_SOURCE`].
    pub source: String,

    /// Strategy the structure was parsed with.
    pub format: PaperFormat,

    /// Paper title, [`DEFAULT_TITLE`] when none was found.
    pub title: String,

    /// Author line. Only LaTeX sources carry one.
    pub author: Option<String>,

    /// Abstract text. Only LaTeX sources carry one.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Top-level headings in document order.
    pub sections: Vec<Heading>,
}

impl DocumentStructure {
    /// Create an empty structure with the default title.
    #[must_use]
    pub fn new(source: impl Into<String>, format: PaperFormat) -> Self {
        Self {
            source: source.into(),
            format,
            title: DEFAULT_TITLE.to_string(),
            author: None,
            abstract_text: None,
            sections: Vec::new(),
        }
    }

    /// Number of top-level sections.
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of headings at every depth.
    #[must_use]
    pub fn heading_count(&self) -> usize {
        self.sections.iter().map(Heading::subtree_len).sum()
    }

    /// All headings in document (pre-)order, paired with their tree depth
    /// (0 for top-level sections).
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, &Heading)> {
        let mut out = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            section.collect_preorder(0, &mut out);
        }
        out
    }

    /// Wrap the structure into a serializable report carrying `section_count`.
    #[must_use]
    pub fn into_report(self) -> StructureReport {
        StructureReport {
            section_count: self.section_count(),
            structure: self,
        }
    }
}

/// Serializable hand-off record: the structure plus its section count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReport {
    /// The parsed structure, flattened into the report object.
    #[serde(flatten)]
    pub structure: DocumentStructure,

    /// Always equal to `structure.sections.len()`.
    pub section_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentStructure {
        let mut doc = DocumentStructure::new(INLINE_SOURCE, PaperFormat::Latex);
        doc.sections = vec![
            Heading::new(1, "Introduction", "We study X.", 0).with_children(vec![
                Heading::new(2, "Background", "Prior work.", 40)
                    .with_children(vec![Heading::new(3, "History", "", 80)]),
            ]),
            Heading::new(1, "Conclusion", "Done.", 120),
        ];
        doc
    }

    #[test]
    fn test_new_structure_defaults() {
        let doc = DocumentStructure::new("paper.tex", PaperFormat::Latex);
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert!(doc.author.is_none());
        assert!(doc.abstract_text.is_none());
        assert_eq!(doc.section_count(), 0);
        assert_eq!(doc.heading_count(), 0);
    }

    #[test]
    fn test_counts() {
        let doc = sample();
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.heading_count(), 4);
        assert_eq!(doc.sections[0].subtree_len(), 3);
        assert!(doc.sections[1].is_leaf());
    }

    #[test]
    fn test_walk_is_preorder_with_depths() {
        let doc = sample();
        let walked: Vec<(usize, &str)> = doc
            .walk()
            .into_iter()
            .map(|(depth, h)| (depth, h.heading.as_str()))
            .collect();
        assert_eq!(
            walked,
            vec![
                (0, "Introduction"),
                (1, "Background"),
                (2, "History"),
                (0, "Conclusion"),
            ]
        );
    }

    #[test]
    fn test_leaf_serializes_empty_children() {
        let heading = Heading::new(2, "Setup", "", 10);
        let json = serde_json::to_value(&heading).unwrap();
        assert_eq!(json["children"], serde_json::json!([]));
        assert_eq!(json["text_excerpt"], "");
    }

    #[test]
    fn test_report_carries_section_count_and_abstract_key() {
        let mut doc = sample();
        doc.abstract_text = Some("Short abstract.".to_string());
        let json = serde_json::to_value(doc.into_report()).unwrap();

        assert_eq!(json["section_count"], 2);
        assert_eq!(json["abstract"], "Short abstract.");
        assert_eq!(json["format"], "latex");
        assert_eq!(json["sections"][0]["children"][0]["heading"], "Background");
    }

    #[test]
    fn test_report_deserializes_back() {
        let report = sample().into_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: StructureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
