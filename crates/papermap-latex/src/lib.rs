//! # papermap-latex
//!
//! LaTeX structure extraction for papermap.
//!
//! This crate recovers the outline of a LaTeX paper (title, author, abstract
//! and the nested section tree) using a pure Rust regex-and-brace-walking
//! approach. No TeX engine is required.
//!
//! ## Supported Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `\title{}` | Document title (nested braces allowed) |
//! | `\author{}` | Author list, `\and` becomes `, ` |
//! | `abstract` environment | Abstract text |
//! | `\section{}` | Level 1 heading |
//! | `\subsection{}` | Level 2 heading |
//! | `\subsubsection{}` | Level 3 heading |
//! | `\paragraph{}` | Level 4 heading, attached to the deepest open node |
//!
//! Starred forms and `[short]` optional titles are accepted. Headings on a
//! commented-out line are ignored.
//!
//! ## Normalization
//!
//! Headings, metadata and excerpts go through [`clean_latex`], an ordered
//! table of named rewrites ([`clean::LATEX_CLEAN_STEPS`]). Citations become
//! `[citation: key]`, references `[ref: key]`, math is wrapped in square
//! brackets and footnotes are inlined as `(note: ...)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use papermap_latex::LatexBackend;
//!
//! let doc = LatexBackend::new().parse(
//!     r"\title{On {X}} \section{Introduction} We study X.",
//!     "provided_content",
//! );
//! assert_eq!(doc.title, "On X");
//! assert_eq!(doc.sections[0].text_excerpt, "We study X.");
//! ```
//!
//! ## Limitations
//!
//! LaTeX is Turing-complete. User macros, conditionals and `\input` files are
//! not expanded; their text passes through with the command names removed.

pub mod braces;
pub mod clean;
pub mod latex;

pub use clean::clean_latex;
pub use latex::{LatexBackend, DEFAULT_LATEX_WINDOW};
