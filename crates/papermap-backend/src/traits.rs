//! Core trait definitions for structure backends

use papermap_core::text::DEFAULT_EXCERPT_CHARS;
use papermap_core::{DocumentStructure, PaperFormat, PaperMapError, Result};
use papermap_latex::{LatexBackend, DEFAULT_LATEX_WINDOW};
use std::path::Path;

/// Raw characters scanned after a closing `</hN>` tag.
pub const DEFAULT_HTML_WINDOW: usize = 400;

/// Raw lines inspected after a Markdown heading.
pub const DEFAULT_MARKDOWN_LOOKAHEAD: usize = 4;

/// Options for structure extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Displayed excerpt budget in characters; longer excerpts are cut and
    /// suffixed with `...`
    pub excerpt_chars: usize,

    /// Raw LaTeX characters normalized into an excerpt
    ///
    /// Markup consumes raw characters without producing displayed ones, so
    /// this should stay well above `excerpt_chars`.
    pub latex_window: usize,

    /// Raw HTML characters normalized into an excerpt
    pub html_window: usize,

    /// Lines after a Markdown heading considered for its excerpt (at most
    /// three non-blank, non-heading lines are kept)
    pub markdown_lookahead: usize,
}

impl ParseOptions {
    /// Create options with a different excerpt budget
    #[inline]
    #[must_use = "returns options with excerpt budget configured"]
    pub const fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Create options with a different LaTeX raw window
    #[inline]
    #[must_use = "returns options with LaTeX window configured"]
    pub const fn with_latex_window(mut self, window: usize) -> Self {
        self.latex_window = window;
        self
    }

    /// Create options with a different HTML raw window
    #[inline]
    #[must_use = "returns options with HTML window configured"]
    pub const fn with_html_window(mut self, window: usize) -> Self {
        self.html_window = window;
        self
    }

    /// Create options with a different Markdown lookahead
    #[inline]
    #[must_use = "returns options with Markdown lookahead configured"]
    pub const fn with_markdown_lookahead(mut self, lines: usize) -> Self {
        self.markdown_lookahead = lines;
        self
    }
}

impl Default for ParseOptions {
    #[inline]
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            latex_window: DEFAULT_LATEX_WINDOW,
            html_window: DEFAULT_HTML_WINDOW,
            markdown_lookahead: DEFAULT_MARKDOWN_LOOKAHEAD,
        }
    }
}

/// Main trait for structure backends
///
/// Each format (LaTeX, HTML, Markdown) implements this trait. Parsing in-memory
/// text never fails; only reading a file can.
pub trait StructureBackend: Send + Sync {
    /// Get the format this backend handles
    fn format(&self) -> PaperFormat;

    /// Parse already-loaded text
    fn parse_str(&self, content: &str, source: &str, options: &ParseOptions)
        -> DocumentStructure;

    /// Parse raw bytes, replacing invalid UTF-8 sequences
    fn parse_bytes(&self, data: &[u8], source: &str, options: &ParseOptions) -> DocumentStructure {
        self.parse_str(&String::from_utf8_lossy(data), source, options)
    }

    /// Parse document from file path
    ///
    /// # Errors
    /// Returns [`PaperMapError::NotFound`] if the path does not exist, or an
    /// I/O error if it cannot be read.
    fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &ParseOptions,
    ) -> Result<DocumentStructure>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PaperMapError::NotFound(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        Ok(self.parse_bytes(&data, &path.display().to_string(), options))
    }

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: PaperFormat) -> bool {
        self.format() == format
    }
}

impl StructureBackend for LatexBackend {
    #[inline]
    fn format(&self) -> PaperFormat {
        PaperFormat::Latex
    }

    fn parse_str(&self, content: &str, source: &str, options: &ParseOptions) -> DocumentStructure {
        self.with_excerpt_chars(options.excerpt_chars)
            .with_window(options.latex_window)
            .parse(content, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papermap_core::INLINE_SOURCE;

    #[test]
    fn test_parse_options_default() {
        let options = ParseOptions::default();
        assert_eq!(options.excerpt_chars, 150);
        assert_eq!(options.latex_window, 400);
        assert_eq!(options.html_window, 400);
        assert_eq!(options.markdown_lookahead, 4);
    }

    #[test]
    fn test_parse_options_chaining() {
        let options = ParseOptions::default()
            .with_excerpt_chars(80)
            .with_latex_window(1000)
            .with_html_window(300)
            .with_markdown_lookahead(6);
        assert_eq!(options.excerpt_chars, 80);
        assert_eq!(options.latex_window, 1000);
        assert_eq!(options.html_window, 300);
        assert_eq!(options.markdown_lookahead, 6);
    }

    #[test]
    fn test_parse_options_override() {
        let options = ParseOptions::default()
            .with_excerpt_chars(10)
            .with_excerpt_chars(20);
        assert_eq!(options.excerpt_chars, 20);
    }

    #[test]
    fn test_latex_backend_respects_options() {
        let options = ParseOptions::default().with_excerpt_chars(5);
        let doc = LatexBackend::new().parse_str(r"\section{A} abcdefgh", INLINE_SOURCE, &options);
        assert_eq!(doc.sections[0].text_excerpt, "abcde...");
    }

    #[test]
    fn test_parse_bytes_is_lossy() {
        let bytes = b"\\section{Caf\xff} text";
        let doc = LatexBackend::new().parse_bytes(bytes, INLINE_SOURCE, &ParseOptions::default());
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "Caf\u{FFFD}");
    }

    #[test]
    fn test_parse_file_missing_is_not_found() {
        let err = LatexBackend::new()
            .parse_file("/definitely/not/here.tex", &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, PaperMapError::NotFound(_)));
    }

    #[test]
    fn test_can_handle() {
        assert!(LatexBackend::new().can_handle(PaperFormat::Latex));
        assert!(!LatexBackend::new().can_handle(PaperFormat::Html));
    }
}
