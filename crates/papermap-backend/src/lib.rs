//! Structure backends for papermap
//!
//! This crate turns paper source text into a [`DocumentStructure`] using one
//! backend per format, all implementing [`StructureBackend`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    StructureConverter                    │
//! │   (format hint / extension detection, PaperSource I/O)   │
//! └──────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  StructureBackend trait                  │
//! │     parse_str(&self, content, source, &ParseOptions)     │
//! └──────────────────────────────────────────────────────────┘
//!                               │
//!          ┌────────────────────┼────────────────────┐
//!          ▼                    ▼                    ▼
//! ┌────────────────┐   ┌────────────────┐   ┌────────────────┐
//! │  LatexBackend  │   │  HtmlBackend   │   │MarkdownBackend │
//! │ regex, braces  │   │ regex, scraper │   │ pulldown-cmark │
//! └────────────────┘   └────────────────┘   └────────────────┘
//! ```
//!
//! | Format | Backend | Nesting |
//! |--------|---------|---------|
//! | LaTeX | [`LatexBackend`] | section / subsection / subsubsection, `\paragraph` at level 4 |
//! | HTML | [`HtmlBackend`] | `h1` / `h2`, `h3`..`h6` under the last `h2` |
//! | Markdown | [`MarkdownBackend`] | `#` / `##`; deeper levels recognized but not attached |
//!
//! # Example
//!
//! ```rust
//! use papermap_backend::StructureConverter;
//! use papermap_core::PaperFormat;
//!
//! let converter = StructureConverter::new();
//! let doc = converter.parse_structure(
//!     "<h1>Intro</h1><p>text</p><h2>Sub</h2>",
//!     Some(PaperFormat::Html),
//! );
//! assert_eq!(doc.sections[0].heading, "Intro");
//! assert_eq!(doc.sections[0].children[0].heading, "Sub");
//! ```
//!
//! Parsing in-memory text never fails. Only [`StructureConverter::parse_file`]
//! and [`StructureConverter::parse_source`] return errors, for missing input.

pub mod converter;
pub mod html;
pub mod markdown;
pub mod traits;

pub use converter::{PaperSource, StructureConverter};
pub use html::HtmlBackend;
pub use markdown::MarkdownBackend;
pub use papermap_core::{DocumentStructure, PaperFormat};
pub use papermap_latex::LatexBackend;
pub use traits::{ParseOptions, StructureBackend};
