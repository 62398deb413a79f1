//! # papermap-core
//!
//! Core types for recovering the logical structure of academic papers.
//!
//! A paper written in LaTeX, HTML or Markdown is parsed (by `papermap-latex`
//! and `papermap-backend`) into a [`DocumentStructure`]: title, author,
//! abstract and a nested tree of [`Heading`]s with short text excerpts. The
//! `papermap-analysis` crate then derives [`Connection`]s between headings.
//!
//! ## Data Model
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Heading`] | One section/subsection/subsubsection/paragraph node |
//! | [`DocumentStructure`] | Metadata plus ordered top-level headings |
//! | [`Connection`] | Directed edge between two headings (by heading text) |
//! | [`PaperFormat`] | Format hint selecting the parsing strategy |
//!
//! ## Text Helpers
//!
//! The [`text`] module holds the format-independent tail of every
//! normalization pipeline: whitespace collapsing, character-safe truncation,
//! entity decoding and HTML escaping.
//!
//! ## Serialization
//!
//! Every record derives `serde` traits so a structure can be handed to
//! rendering collaborators as JSON or YAML ([`JsonSerializer`],
//! [`YamlSerializer`]):
//!
//! ```rust
//! use papermap_core::{DocumentStructure, Heading, PaperFormat};
//!
//! let mut doc = DocumentStructure::new("provided_content", PaperFormat::Markdown);
//! doc.sections.push(Heading::new(1, "Introduction", "We study X.", 0));
//!
//! let json = serde_json::to_string(&doc.into_report()).unwrap();
//! assert!(json.contains("\"section_count\":1"));
//! ```

pub mod connection;
pub mod error;
pub mod format;
pub mod serializer;
pub mod structure;
pub mod text;

pub use connection::{Connection, ConnectionReport, ConnectionType, Strength};
pub use error::{PaperMapError, Result};
pub use format::PaperFormat;
pub use serializer::{JsonSerializer, YamlSerializer};
pub use structure::{DocumentStructure, Heading, StructureReport, DEFAULT_TITLE, INLINE_SOURCE};
