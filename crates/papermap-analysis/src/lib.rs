//! # papermap-analysis
//!
//! Infers relationships between the sections of a parsed paper.
//!
//! | Type | Strength | Rule |
//! |------|----------|------|
//! | `sequential` | strong | top-level heading to the next top-level heading |
//! | `hierarchical` | strong | section to subsection, subsection to subsubsection |
//! | `semantic` | medium / weak | keyword rules on heading text, see [`SEMANTIC_RULES`] |
//!
//! Headings are identified by their text, so two sections with identical
//! headings collapse into one node once edges are deduplicated.
//!
//! ```rust
//! use papermap_analysis::analyze_connections;
//! use papermap_core::{ConnectionType, DocumentStructure, Heading, PaperFormat};
//!
//! let mut doc = DocumentStructure::new("provided_content", PaperFormat::Latex);
//! doc.sections.push(Heading::new(1, "Introduction", "", 0));
//! doc.sections.push(Heading::new(1, "Proposed Method", "", 10));
//!
//! let connections = analyze_connections(&doc);
//! assert_eq!(connections[0].kind, ConnectionType::Sequential);
//! assert_eq!(connections[1].kind, ConnectionType::Semantic);
//! ```

pub mod connections;

pub use connections::{
    analyze_connections, analyze_report, dedup_connections, SemanticRule, SEMANTIC_RULES,
};
