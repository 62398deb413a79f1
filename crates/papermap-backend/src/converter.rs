//! Structure converter - format dispatch and input resolution
//!
//! [`StructureConverter`] routes text to the LaTeX, HTML or Markdown backend.
//! Callers holding a path and/or literal content describe it with a
//! [`PaperSource`]; only that path is ever read from disk.

use crate::html::HtmlBackend;
use crate::markdown::MarkdownBackend;
use crate::traits::{ParseOptions, StructureBackend};
use log::debug;
use papermap_core::{DocumentStructure, PaperFormat, PaperMapError, Result, INLINE_SOURCE};
use papermap_latex::LatexBackend;
use std::path::{Path, PathBuf};

/// Where a paper comes from: a file, literal content, or both.
///
/// Literal content wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperSource {
    /// File to read (also used for format detection)
    pub path: Option<PathBuf>,
    /// Already-loaded paper text
    pub content: Option<String>,
}

impl PaperSource {
    /// Source backed by a file.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            content: None,
        }
    }

    /// Source backed by literal content.
    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            path: None,
            content: Some(content.into()),
        }
    }

    /// Attach literal content to a source.
    #[must_use = "returns source with content attached"]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Format implied by the path extension, if any.
    #[must_use]
    pub fn detected_format(&self) -> Option<PaperFormat> {
        self.path.as_deref().and_then(PaperFormat::from_path)
    }
}

/// Dispatches paper text to the backend for its format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StructureConverter {
    options: ParseOptions,
}

impl StructureConverter {
    /// Create a converter with default [`ParseOptions`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    #[inline]
    #[must_use]
    pub const fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options used for every parse.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse in-memory text. A missing format hint means LaTeX.
    #[must_use]
    pub fn parse_structure(&self, content: &str, format: Option<PaperFormat>) -> DocumentStructure {
        self.parse_as(content, INLINE_SOURCE, format.unwrap_or_default())
    }

    /// Parse in-memory LaTeX text.
    #[must_use]
    pub fn parse_latex(&self, content: &str) -> DocumentStructure {
        self.parse_as(content, INLINE_SOURCE, PaperFormat::Latex)
    }

    /// Parse in-memory HTML text.
    #[must_use]
    pub fn parse_html(&self, content: &str) -> DocumentStructure {
        self.parse_as(content, INLINE_SOURCE, PaperFormat::Html)
    }

    /// Parse in-memory Markdown text.
    #[must_use]
    pub fn parse_markdown(&self, content: &str) -> DocumentStructure {
        self.parse_as(content, INLINE_SOURCE, PaperFormat::Markdown)
    }

    /// Parse text with an explicit source identifier and format.
    #[must_use]
    pub fn parse_as(&self, content: &str, source: &str, format: PaperFormat) -> DocumentStructure {
        match format {
            PaperFormat::Latex => LatexBackend::new().parse_str(content, source, &self.options),
            PaperFormat::Html => HtmlBackend::new().parse_str(content, source, &self.options),
            PaperFormat::Markdown => {
                MarkdownBackend::new().parse_str(content, source, &self.options)
            }
        }
    }

    /// Parse a file, detecting the format from its extension unless `format`
    /// is given. Unknown extensions are parsed as LaTeX.
    ///
    /// # Errors
    /// [`PaperMapError::NotFound`] if the file does not exist, or an I/O error
    /// if it cannot be read. Invalid UTF-8 is replaced, never rejected.
    pub fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: Option<PaperFormat>,
    ) -> Result<DocumentStructure> {
        let path = path.as_ref();
        let format = format
            .or_else(|| PaperFormat::from_path(path))
            .unwrap_or_default();
        debug!("Parsing {} as {format}", path.display());

        let options = &self.options;
        match format {
            PaperFormat::Latex => LatexBackend::new().parse_file(path, options),
            PaperFormat::Html => HtmlBackend::new().parse_file(path, options),
            PaperFormat::Markdown => MarkdownBackend::new().parse_file(path, options),
        }
    }

    /// Resolve a [`PaperSource`] and parse it.
    ///
    /// Literal content takes precedence and is reported with the
    /// `provided_content` source identifier; the path then only serves
    /// format detection.
    ///
    /// # Errors
    /// [`PaperMapError::NotFound`] if neither a path nor content is given, or
    /// the path does not exist.
    pub fn parse_source(
        &self,
        source: &PaperSource,
        format: Option<PaperFormat>,
    ) -> Result<DocumentStructure> {
        let format = format.or_else(|| source.detected_format());
        match (&source.content, &source.path) {
            (Some(content), _) => {
                Ok(self.parse_as(content, INLINE_SOURCE, format.unwrap_or_default()))
            }
            (None, Some(path)) => self.parse_file(path, format),
            (None, None) => Err(PaperMapError::NotFound(
                "no paper path or content provided".to_string(),
            )),
        }
    }
}
