//! Markdown Backend - Recover paper outlines from Markdown sources
//!
//! Headings are found line by line (ATX style, `#` to `####`) so their byte
//! offsets are exact. Inline markup inside headings and excerpt lines is
//! reduced to plain text with `pulldown-cmark`.
//!
//! ## Nesting
//! - The first `#` line is the title and is not part of the outline
//! - Every later `#` opens a top-level heading
//! - `##` attaches to the current top-level heading
//! - `###` and `####` are recognized but not attached anywhere
//!
//! Lines inside fenced code blocks are never headings.

use crate::traits::{ParseOptions, StructureBackend};
use log::{debug, trace};
use papermap_core::text::finish_plain_text;
use papermap_core::{DocumentStructure, Heading, PaperFormat, DEFAULT_TITLE};
use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;
use std::sync::LazyLock;

static RE_ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,4})\s+(.+)$").expect("valid markdown heading regex"));

/// Maximum number of excerpt lines joined after a heading.
const EXCERPT_LINES: usize = 3;

/// One physical line with its byte offset in the source.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    offset: usize,
    text: &'a str,
    in_fence: bool,
}

/// Markdown structure backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkdownBackend;

impl MarkdownBackend {
    /// Create a new Markdown backend
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse Markdown text into a [`DocumentStructure`].
    #[must_use]
    pub fn parse(&self, content: &str, source: &str, options: &ParseOptions) -> DocumentStructure {
        let mut doc = DocumentStructure::new(source, PaperFormat::Markdown);
        let lines = split_lines(content);
        let mut title: Option<String> = None;

        for (i, line) in lines.iter().enumerate() {
            let Some((level, text)) = parse_heading_line(line) else {
                continue;
            };
            if text.is_empty() {
                continue;
            }

            if level == 1 && title.is_none() {
                title = Some(text);
                continue;
            }

            let excerpt = excerpt_for(&lines[i + 1..], options);
            let heading = Heading::new(level, text, excerpt, line.offset);

            match level {
                1 => doc.sections.push(heading),
                2 => match doc.sections.last_mut() {
                    Some(section) => section.children.push(heading),
                    None => {
                        trace!("Dropping level-2 heading before any level-1: {}", heading.heading)
                    }
                },
                _ => trace!("Level-{level} heading not attached: {}", heading.heading),
            }
        }

        doc.title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());

        debug!(
            "Parsed Markdown structure from {}: {} sections, {} headings",
            doc.source,
            doc.section_count(),
            doc.heading_count()
        );
        doc
    }
}

/// Split into lines, tracking byte offsets and fenced code blocks.
fn split_lines(content: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut fence: Option<&str> = None;

    for raw in content.split('\n') {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let marker = fence_marker(text);

        let in_fence = match (fence, marker) {
            (None, Some(m)) => {
                fence = Some(m);
                true
            }
            (Some(open), Some(m)) if m == open => {
                fence = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        };

        lines.push(Line {
            offset,
            text,
            in_fence,
        });
        offset += raw.len() + 1;
    }

    lines
}

/// "```" or "~~~" when the line opens or closes a fence (up to 3 spaces indent).
fn fence_marker(line: &str) -> Option<&'static str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let trimmed = &line[indent..];
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Level and cleaned text of an ATX heading line outside code fences.
fn parse_heading_line(line: &Line<'_>) -> Option<(u8, String)> {
    if line.in_fence {
        return None;
    }
    let cap = RE_ATX_HEADING.captures(line.text)?;
    let level = u8::try_from(cap.get(1)?.as_str().len()).ok()?;
    Some((level, finish_plain_text(&markdown_plain_text(line.text), None)))
}

/// Up to three non-blank, non-heading lines from the lookahead, joined.
fn excerpt_for(following: &[Line<'_>], options: &ParseOptions) -> String {
    let joined = following
        .iter()
        .take(options.markdown_lookahead)
        .map(|line| line.text.trim())
        .filter(|text| !text.is_empty() && !text.starts_with('#'))
        .take(EXCERPT_LINES)
        .map(markdown_plain_text)
        .collect::<Vec<_>>()
        .join(" ");
    finish_plain_text(&joined, Some(options.excerpt_chars))
}

/// Text content of a Markdown fragment with all markup events dropped.
fn markdown_plain_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for event in Parser::new_ext(fragment, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out
}

impl StructureBackend for MarkdownBackend {
    #[inline]
    fn format(&self) -> PaperFormat {
        PaperFormat::Markdown
    }

    fn parse_str(&self, content: &str, source: &str, options: &ParseOptions) -> DocumentStructure {
        self.parse(content, source, options)
    }
}
