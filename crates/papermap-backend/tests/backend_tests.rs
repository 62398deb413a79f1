//! Cross-format behavior of the structure backends.

use papermap_backend::{PaperFormat, PaperSource, ParseOptions, StructureConverter};
use papermap_core::{PaperMapError, INLINE_SOURCE};

const LATEX: &str = r"\title{A Study}
\section{Introduction} We study X.
\subsection{Motivation} Because.
\section{Method} We propose Y.
\section{Results} It works.";

const HTML: &str = "<html><head><title>A Study</title></head><body>
<h1>Introduction</h1><p>We study X.</p>
<h2>Motivation</h2><p>Because.</p>
<h1>Method</h1><p>We propose Y.</p>
<h1>Results</h1><p>It works.</p>
</body></html>";

const MARKDOWN: &str = "# A Study

# Introduction
We study X.

## Motivation
Because.

# Method
We propose Y.

# Results
It works.
";

fn headings(format: PaperFormat, content: &str) -> Vec<(usize, String)> {
    StructureConverter::new()
        .parse_structure(content, Some(format))
        .walk()
        .into_iter()
        .map(|(depth, h)| (depth, h.heading.clone()))
        .collect()
}

#[test]
fn test_same_outline_in_every_format() {
    let expected = vec![
        (0, "Introduction".to_string()),
        (1, "Motivation".to_string()),
        (0, "Method".to_string()),
        (0, "Results".to_string()),
    ];
    assert_eq!(headings(PaperFormat::Latex, LATEX), expected);
    assert_eq!(headings(PaperFormat::Html, HTML), expected);
    assert_eq!(headings(PaperFormat::Markdown, MARKDOWN), expected);
}

#[test]
fn test_titles_per_format() {
    let converter = StructureConverter::new();
    assert_eq!(converter.parse_latex(LATEX).title, "A Study");
    assert_eq!(converter.parse_html(HTML).title, "A Study");
    assert_eq!(converter.parse_markdown(MARKDOWN).title, "A Study");
}

#[test]
fn test_levels_match_depth() {
    let converter = StructureConverter::new();
    for (format, content) in [
        (PaperFormat::Latex, LATEX),
        (PaperFormat::Html, HTML),
        (PaperFormat::Markdown, MARKDOWN),
    ] {
        let doc = converter.parse_structure(content, Some(format));
        for (depth, heading) in doc.walk() {
            assert_eq!(usize::from(heading.level), depth + 1, "{format}: {}", heading.heading);
        }
    }
}

#[test]
fn test_excerpts_start_with_following_text() {
    let converter = StructureConverter::new();
    for (format, content) in [
        (PaperFormat::Latex, LATEX),
        (PaperFormat::Html, HTML),
        (PaperFormat::Markdown, MARKDOWN),
    ] {
        let doc = converter.parse_structure(content, Some(format));
        assert!(
            doc.sections[1].text_excerpt.starts_with("We propose Y."),
            "{format}: {}",
            doc.sections[1].text_excerpt
        );
    }
}

#[test]
fn test_excerpts_never_contain_markup() {
    let converter = StructureConverter::new();
    let latex = converter.parse_latex(LATEX);
    let html = converter.parse_html(HTML);
    for doc in [latex, html] {
        for (_, heading) in doc.walk() {
            assert!(!heading.text_excerpt.contains('\\'));
            assert!(!heading.text_excerpt.contains('<'));
        }
    }
}

#[test]
fn test_parse_source_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.md");
    std::fs::write(&path, MARKDOWN).unwrap();

    let doc = StructureConverter::new()
        .parse_source(&PaperSource::from_path(&path), None)
        .unwrap();
    assert_eq!(doc.format, PaperFormat::Markdown);
    assert_eq!(doc.section_count(), 3);
    assert_ne!(doc.source, INLINE_SOURCE);
}

#[test]
fn test_parse_source_errors() {
    let converter = StructureConverter::new();
    assert!(matches!(
        converter.parse_source(&PaperSource::default(), None),
        Err(PaperMapError::NotFound(_))
    ));
    assert!(matches!(
        converter.parse_file("/missing/paper.html", None),
        Err(PaperMapError::NotFound(_))
    ));
}

#[test]
fn test_custom_budget_applies_to_all_formats() {
    let converter = StructureConverter::with_options(ParseOptions::default().with_excerpt_chars(4));
    for format in PaperFormat::ALL {
        let content = match format {
            PaperFormat::Latex => LATEX,
            PaperFormat::Html => HTML,
            PaperFormat::Markdown => MARKDOWN,
        };
        let doc = converter.parse_structure(content, Some(format));
        assert_eq!(doc.sections[0].text_excerpt, "We s...", "{format}");
    }
}

#[test]
fn test_report_serialization() {
    let doc = StructureConverter::new().parse_html(HTML);
    let json = serde_json::to_value(doc.into_report()).unwrap();
    assert_eq!(json["section_count"], 3);
    assert_eq!(json["format"], "html");
    assert_eq!(json["sections"][0]["children"][0]["level"], 2);
}
