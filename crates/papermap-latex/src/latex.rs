//! Pure Rust LaTeX structure extraction
//!
//! Strategy:
//! 1. Locate `\title`, `\author` and the `abstract` environment
//! 2. Scan `\section`, `\subsection`, `\subsubsection`, `\paragraph` in document order
//! 3. Read heading arguments with the balanced-brace extractor
//! 4. Normalize a bounded raw window after each heading into an excerpt
//! 5. Attach each heading to the most recently opened parent
//!
//! Note: This is a pragmatic solution. LaTeX is Turing-complete and full parsing
//! would require a complete TeX engine. This handles common academic documents.

use crate::braces::{extract_braced_arg, skip_to_required_arg};
use crate::clean::clean_latex;
use log::{debug, trace};
use papermap_core::text::{raw_window, DEFAULT_EXCERPT_CHARS};
use papermap_core::{DocumentStructure, Heading, PaperFormat, DEFAULT_TITLE};
use regex::Regex;
use std::sync::LazyLock;

/// Raw characters scanned after a heading command.
///
/// Markup consumes budget without producing displayed text, so the window is
/// well above the display budget.
pub const DEFAULT_LATEX_WINDOW: usize = 400;

// -- Section patterns --
static RE_HEADING_CMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(section|subsection|subsubsection|paragraph)\*?").expect("valid heading regex")
});

// -- Metadata patterns --
static RE_TITLE_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\title\b").expect("valid title regex"));
static RE_AUTHOR_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\author\b").expect("valid author regex"));
static RE_AUTHOR_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\\and\b\s*").expect("valid author separator regex"));
static RE_ABSTRACT_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{abstract\}(.*?)\\end\{abstract\}").expect("valid abstract regex")
});
static RE_ABSTRACT_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\abstract\b").expect("valid abstract cmd regex"));

/// Sectioning command kinds, in nesting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HeadingKind {
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
}

impl HeadingKind {
    fn from_command(name: &str) -> Option<Self> {
        match name {
            "section" => Some(Self::Section),
            "subsection" => Some(Self::Subsection),
            "subsubsection" => Some(Self::Subsubsection),
            "paragraph" => Some(Self::Paragraph),
            _ => None,
        }
    }

    const fn level(self) -> u8 {
        match self {
            Self::Section => 1,
            Self::Subsection => 2,
            Self::Subsubsection => 3,
            Self::Paragraph => 4,
        }
    }
}

/// Backend for LaTeX sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatexBackend {
    excerpt_chars: usize,
    window: usize,
}

impl Default for LatexBackend {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LatexBackend {
    /// Create a LaTeX backend with the default excerpt budget and window.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            window: DEFAULT_LATEX_WINDOW,
        }
    }

    /// Set the displayed excerpt budget (characters, before `...`).
    #[inline]
    #[must_use = "returns backend with excerpt budget configured"]
    pub const fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Set the raw window scanned after each heading command.
    #[inline]
    #[must_use = "returns backend with raw window configured"]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Get the backend name
    #[inline]
    #[must_use = "returns backend name string"]
    pub const fn name(&self) -> &'static str {
        "LaTeX (Pure Rust)"
    }

    /// Parse LaTeX source into a [`DocumentStructure`].
    ///
    /// Never fails: unknown commands and unbalanced braces degrade to literal
    /// text or omitted headings.
    #[must_use]
    pub fn parse(&self, content: &str, source: &str) -> DocumentStructure {
        let mut doc = DocumentStructure::new(source, PaperFormat::Latex);

        let (title, author) = self.extract_metadata(content);
        doc.title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        doc.author = author;
        doc.abstract_text = Self::extract_abstract(content);
        doc.sections = self.build_section_tree(content);

        debug!(
            "Parsed LaTeX structure from {}: {} sections, {} headings",
            doc.source,
            doc.section_count(),
            doc.heading_count()
        );
        doc
    }

    /// Extract title and author from the preamble.
    ///
    /// Both arguments may contain nested braces (footnotes, `\thanks`, grouping).
    /// Empty-after-cleaning values are reported as absent.
    #[must_use]
    pub fn extract_metadata(&self, source: &str) -> (Option<String>, Option<String>) {
        let title = find_command_arg(source, &RE_TITLE_CMD)
            .map(|raw| clean_latex(raw, None))
            .filter(|t| !t.is_empty());

        let author = find_command_arg(source, &RE_AUTHOR_CMD)
            .map(|raw| clean_latex(&RE_AUTHOR_AND.replace_all(raw, ", "), None))
            .filter(|a| !a.is_empty());

        (title, author)
    }

    /// Extract the first `abstract` environment (or `\abstract{...}` command).
    #[must_use]
    pub fn extract_abstract(source: &str) -> Option<String> {
        if let Some(cap) = RE_ABSTRACT_ENV.captures(source) {
            return cap.get(1).map(|m| clean_latex(m.as_str(), None));
        }
        find_command_arg(source, &RE_ABSTRACT_CMD).map(|raw| clean_latex(raw, None))
    }

    /// Scan sectioning commands and nest them.
    ///
    /// A subsection before any section, or a subsubsection before any
    /// subsection, is dropped. `\paragraph` attaches to the deepest open node.
    fn build_section_tree(&self, source: &str) -> Vec<Heading> {
        let mut sections: Vec<Heading> = Vec::new();
        // Index of the open subsection within the last section, and of the open
        // subsubsection within that subsection.
        let mut open_sub: Option<usize> = None;
        let mut open_subsub: Option<usize> = None;

        for (kind, heading) in self.scan_headings(source) {
            match kind {
                HeadingKind::Section => {
                    sections.push(heading);
                    open_sub = None;
                    open_subsub = None;
                }
                HeadingKind::Subsection => match sections.last_mut() {
                    Some(section) => {
                        section.children.push(heading);
                        open_sub = Some(section.children.len() - 1);
                        open_subsub = None;
                    }
                    None => trace!("Dropping subsection before any section: {}", heading.heading),
                },
                HeadingKind::Subsubsection => {
                    match open_sub.and_then(|i| sections.last_mut()?.children.get_mut(i)) {
                        Some(sub) => {
                            sub.children.push(heading);
                            open_subsub = Some(sub.children.len() - 1);
                        }
                        None => trace!(
                            "Dropping subsubsection before any subsection: {}",
                            heading.heading
                        ),
                    }
                }
                HeadingKind::Paragraph => {
                    let parent = sections
                        .last_mut()
                        .map(|section| deepest_open(section, open_sub, open_subsub));
                    match parent {
                        Some(node) => node.children.push(heading),
                        None => {
                            trace!("Dropping paragraph before any section: {}", heading.heading)
                        }
                    }
                }
            }
        }

        sections
    }

    /// All sectioning commands in document order, as unattached headings.
    fn scan_headings(&self, source: &str) -> Vec<(HeadingKind, Heading)> {
        let mut found = Vec::new();

        for cap in RE_HEADING_CMD.captures_iter(source) {
            let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let Some(kind) = HeadingKind::from_command(name.as_str()) else {
                continue;
            };
            if is_commented_out(source, full.start()) {
                trace!("Skipping commented-out \\{} at {}", name.as_str(), full.start());
                continue;
            }
            let Some((raw_heading, after)) = skip_to_required_arg(source, full.end())
                .and_then(|open| extract_braced_arg(source, open))
            else {
                continue;
            };

            let heading = clean_latex(raw_heading, None);
            let excerpt = clean_latex(
                raw_window(source, after, self.window),
                Some(self.excerpt_chars),
            );
            found.push((
                kind,
                Heading::new(kind.level(), heading, excerpt, full.start()),
            ));
        }

        found
    }
}

/// Deepest node still open under `section`.
fn deepest_open(
    section: &mut Heading,
    open_sub: Option<usize>,
    open_subsub: Option<usize>,
) -> &mut Heading {
    match open_sub {
        Some(i) if i < section.children.len() => {
            let sub = &mut section.children[i];
            match open_subsub {
                Some(j) if j < sub.children.len() => &mut sub.children[j],
                _ => sub,
            }
        }
        _ => section,
    }
}

/// Raw argument of the first non-commented occurrence of a command.
fn find_command_arg<'a>(source: &'a str, command: &Regex) -> Option<&'a str> {
    command
        .find_iter(source)
        .filter(|m| !is_commented_out(source, m.start()))
        .find_map(|m| {
            skip_to_required_arg(source, m.end())
                .and_then(|open| extract_braced_arg(source, open))
                .map(|(arg, _)| arg)
        })
}

/// True when an unescaped `%` precedes `pos` on the same line.
fn is_commented_out(source: &str, pos: usize) -> bool {
    let line_start = source[..pos].rfind('\n').map_or(0, |p| p + 1);
    let prefix = source[line_start..pos].as_bytes();
    prefix
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'%' && (i == 0 || prefix[i - 1] != b'\\'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use papermap_core::INLINE_SOURCE;

    fn parse(content: &str) -> DocumentStructure {
        LatexBackend::new().parse(content, INLINE_SOURCE)
    }

    #[test]
    fn test_latex_backend_default() {
        assert_eq!(LatexBackend::default(), LatexBackend::new());
        assert_eq!(LatexBackend::new().name(), "LaTeX (Pure Rust)");
    }

    #[test]
    fn test_three_level_nesting() {
        let doc = parse(
            r"\section{A} text a \subsection{B} text b \subsubsection{C} text c",
        );
        assert_eq!(doc.section_count(), 1);
        let a = &doc.sections[0];
        assert_eq!(a.heading, "A");
        assert_eq!(a.level, 1);
        assert_eq!(a.children.len(), 1);
        let b = &a.children[0];
        assert_eq!(b.heading, "B");
        assert_eq!(b.level, 2);
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].heading, "C");
        assert_eq!(b.children[0].level, 3);
        assert!(b.children[0].children.is_empty());
    }

    #[test]
    fn test_introduction_background_scenario() {
        let doc = parse(
            "\\section{Introduction}\nWe study X. \\subsection{Background}\nPrior work on Y.",
        );
        assert_eq!(doc.section_count(), 1);
        let intro = &doc.sections[0];
        assert_eq!(intro.heading, "Introduction");
        assert_eq!(intro.level, 1);
        assert!(intro.text_excerpt.starts_with("We study X."));
        assert_eq!(intro.children.len(), 1);
        assert_eq!(intro.children[0].heading, "Background");
        assert_eq!(intro.children[0].level, 2);
        assert_eq!(intro.children[0].text_excerpt, "Prior work on Y.");
    }

    #[test]
    fn test_nested_title_braces() {
        let doc = parse(r"\title{Study of {X} and {Y}} \section{Intro}");
        assert_eq!(doc.title, "Study of X and Y");
    }

    #[test]
    fn test_title_line_break_and_escaped_braces() {
        let doc = parse(r"\title{Deep Learning\\for Graphs} \section{Intro}");
        assert_eq!(doc.title, "Deep Learning for Graphs");
        let doc = parse(r"\title{Sets \{a, b\} here}");
        assert_eq!(doc.title, "Sets {a, b} here");

        let (_, author) = LatexBackend::new()
            .extract_metadata(r"\author{Ada Lovelace\\Analytical Society \and Alan Turing}");
        assert_eq!(author.as_deref(), Some("Ada Lovelace Analytical Society, Alan Turing"));
    }

    #[test]
    fn test_title_with_footnote_and_author_list() {
        let (title, author) = LatexBackend::new().extract_metadata(
            r"\title{Deep {Graph} Models\thanks{Funded by {NSF}.}}
\author{Ada Lovelace \and Alan Turing}",
        );
        assert_eq!(title.as_deref(), Some("Deep Graph Models Funded by NSF."));
        assert_eq!(author.as_deref(), Some("Ada Lovelace, Alan Turing"));
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let doc = parse(r"\section{Only}");
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert!(doc.author.is_none());
        assert!(doc.abstract_text.is_none());
    }

    #[test]
    fn test_abstract_first_occurrence() {
        let doc = parse(
            "\\begin{abstract}\nWe propose \\emph{a} method.\n\\end{abstract}\n\\begin{abstract}Second\\end{abstract}",
        );
        assert_eq!(doc.abstract_text.as_deref(), Some("We propose a method."));
    }

    #[test]
    fn test_orphan_subsections_are_dropped() {
        let doc = parse(
            r"\subsection{Orphan} \subsubsection{Deeper} \section{Real} \subsubsection{Skipped}",
        );
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].heading, "Real");
        assert!(doc.sections[0].children.is_empty());
    }

    #[test]
    fn test_section_resets_open_subsection() {
        let doc = parse(r"\section{One} \subsection{One.A} \section{Two} \subsubsection{Lost}");
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.sections[0].children.len(), 1);
        assert!(doc.sections[1].children.is_empty());
    }

    #[test]
    fn test_paragraph_attaches_to_deepest_open_node() {
        let doc = parse(
            r"\section{S} \paragraph{P1} \subsection{SS} \paragraph{P2} \subsubsection{SSS} \paragraph{P3}",
        );
        let s = &doc.sections[0];
        assert_eq!(s.children[0].heading, "P1");
        assert_eq!(s.children[0].level, 4);
        let ss = &s.children[1];
        assert_eq!(ss.heading, "SS");
        assert_eq!(ss.children[0].heading, "P2");
        let sss = &ss.children[1];
        assert_eq!(sss.heading, "SSS");
        assert_eq!(sss.children[0].heading, "P3");
        assert_eq!(sss.children[0].level, 4);
    }

    #[test]
    fn test_paragraph_before_any_section_is_dropped() {
        let doc = parse(r"\paragraph{Loose} \section{S}");
        assert_eq!(doc.section_count(), 1);
        assert!(doc.sections[0].children.is_empty());
    }

    #[test]
    fn test_starred_and_optional_arguments() {
        let doc = parse(r"\section*{Acknowledgments} \section[Short]{Long {Title}}");
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Acknowledgments", "Long Title"]);
    }

    #[test]
    fn test_commented_out_headings_are_skipped() {
        let doc =
            parse("% \\section{Old draft}\n\\section{Kept} 100\\% sure \\subsection{Also kept}");
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].heading, "Kept");
        assert_eq!(doc.sections[0].children[0].heading, "Also kept");
    }

    #[test]
    fn test_sectionmark_is_not_a_section() {
        let doc = parse(r"\sectionmark{x} \section{Real}");
        assert_eq!(doc.section_count(), 1);
    }

    #[test]
    fn test_positions_are_increasing() {
        let content = r"\section{A} \subsection{B} \section{C}";
        let doc = parse(content);
        let positions: Vec<usize> = doc.walk().iter().map(|(_, h)| h.position).collect();
        assert_eq!(positions, vec![0, 12, 27]);
        assert!(content[positions[2]..].starts_with(r"\section{C}"));
    }

    #[test]
    fn test_excerpt_is_truncated_with_ellipsis() {
        let body = "lorem ipsum ".repeat(60);
        let doc = parse(&format!("\\section{{Long}}\n{body}"));
        let excerpt = &doc.sections[0].text_excerpt;
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), DEFAULT_EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_custom_excerpt_budget() {
        let backend = LatexBackend::new().with_excerpt_chars(10).with_window(50);
        let doc = backend.parse(r"\section{A} abcdefghijklmnopqrstuvwxyz", INLINE_SOURCE);
        assert_eq!(doc.sections[0].text_excerpt, "abcdefghij...");
    }

    #[test]
    fn test_excerpt_has_no_markup() {
        let doc = parse(
            r"\section{Method} We use \textbf{attention} \cite{vaswani} with $d_k$ keys.\label{sec:m}",
        );
        let excerpt = &doc.sections[0].text_excerpt;
        assert_eq!(
            excerpt,
            "We use attention [citation: vaswani] with [d_k] keys."
        );
    }

    #[test]
    fn test_heading_is_html_escaped() {
        let doc = parse(r"\section{Q\&A <live>}");
        assert_eq!(doc.sections[0].heading, "Q&amp;A &lt;live&gt;");
    }

    #[test]
    fn test_unterminated_heading_is_skipped() {
        let doc = parse(r"\section{Fine} text \section{Broken");
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.sections[0].heading, "Fine");
    }

    #[test]
    fn test_empty_content() {
        let doc = parse("");
        assert_eq!(doc.section_count(), 0);
        assert_eq!(doc.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_multibyte_window_boundary() {
        let body = "é".repeat(300);
        let doc = parse(&format!("\\section{{Ü}}{body}"));
        assert_eq!(doc.sections[0].heading, "Ü");
        assert!(doc.sections[0].text_excerpt.starts_with("ééé"));
    }
}
