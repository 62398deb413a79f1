//! HTML Backend - Recover paper outlines from HTML renderings
//!
//! Targets the HTML produced by arXiv/ar5iv, Pandoc and similar converters.
//!
//! - Title from the first `<title>` element; author and abstract stay absent
//! - Headings from `<h1>`..`<h6>` in document order
//! - `<h1>` opens a top-level heading, `<h2>` attaches to it, `<h3>`..`<h6>`
//!   attach to the last `<h2>` of the current `<h1>` and keep their tag level
//! - Excerpts are a bounded raw window after the closing tag with tags stripped
//!
//! No deeper nesting is modeled, so the tree is flatter than the LaTeX one.

use crate::traits::{ParseOptions, StructureBackend};
use log::{debug, trace};
use papermap_core::text::{decode_html_entities, finish_plain_text, raw_window};
use papermap_core::{DocumentStructure, Heading, PaperFormat, DEFAULT_TITLE};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

// -- Heading patterns --
// The regex crate has no backreferences, so any closing `</hN>` ends a heading.
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]\s*>").expect("valid heading regex")
});

// -- Excerpt patterns --
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static RE_PARTIAL_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*$").expect("valid partial tag regex"));

/// HTML structure backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HtmlBackend;

impl HtmlBackend {
    /// Create a new HTML backend
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse HTML text into a [`DocumentStructure`].
    #[must_use]
    pub fn parse(&self, content: &str, source: &str, options: &ParseOptions) -> DocumentStructure {
        let mut doc = DocumentStructure::new(source, PaperFormat::Html);

        let document = Html::parse_document(content);
        doc.title = Self::extract_title(&document).unwrap_or_else(|| DEFAULT_TITLE.to_string());
        doc.sections = Self::build_section_tree(content, options);

        debug!(
            "Parsed HTML structure from {}: {} sections, {} headings",
            doc.source,
            doc.section_count(),
            doc.heading_count()
        );
        doc
    }

    fn extract_title(document: &Html) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let element = document.select(&selector).next()?;
        let title = finish_plain_text(&element.text().collect::<String>(), None);
        (!title.is_empty()).then_some(title)
    }

    fn build_section_tree(content: &str, options: &ParseOptions) -> Vec<Heading> {
        let mut sections: Vec<Heading> = Vec::new();

        for cap in RE_HEADING.captures_iter(content) {
            let (Some(full), Some(level), Some(inner)) = (cap.get(0), cap.get(1), cap.get(2))
            else {
                continue;
            };
            let level: u8 = level.as_str().parse().unwrap_or(1);

            let text = heading_text(inner.as_str());
            if text.is_empty() {
                continue;
            }
            let excerpt = excerpt_text(
                raw_window(content, full.end(), options.html_window),
                options.excerpt_chars,
            );
            let heading = Heading::new(level, text, excerpt, full.start());

            match level {
                1 => sections.push(heading),
                2 => match sections.last_mut() {
                    Some(section) => section.children.push(heading),
                    None => trace!("Dropping <h2> before any <h1>: {}", heading.heading),
                },
                _ => match sections.last_mut().and_then(|s| s.children.last_mut()) {
                    Some(sub) => sub.children.push(heading),
                    None => trace!("Dropping <h{level}> without an open <h2>: {}", heading.heading),
                },
            }
        }

        sections
    }
}

/// Visible text of a heading's inner HTML, entity-decoded by the HTML parser.
fn heading_text(inner_html: &str) -> String {
    let fragment = Html::parse_fragment(inner_html);
    let text: String = fragment.root_element().text().collect();
    finish_plain_text(&text, None)
}

/// Tags removed by pattern, including a tag cut off by the window end.
fn excerpt_text(window: &str, max_chars: usize) -> String {
    let stripped = RE_TAG.replace_all(window, " ");
    let stripped = RE_PARTIAL_TAG.replace(&stripped, "");
    finish_plain_text(&decode_html_entities(&stripped), Some(max_chars))
}

impl StructureBackend for HtmlBackend {
    #[inline]
    fn format(&self) -> PaperFormat {
        PaperFormat::Html
    }

    fn parse_str(&self, content: &str, source: &str, options: &ParseOptions) -> DocumentStructure {
        self.parse(content, source, options)
    }
}
