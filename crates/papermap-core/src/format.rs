//! Source formats understood by the structural parsers
//!
//! This module defines the `PaperFormat` enum (the "format hint") which selects
//! the LaTeX, HTML or Markdown parsing strategy.

use crate::error::PaperMapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source format of a paper
///
/// LaTeX is the default when the caller declares nothing and the file
/// extension is missing or unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    /// LaTeX source (.tex)
    #[default]
    Latex,
    /// HTML document (.html, .htm)
    Html,
    /// Markdown document (.md, .markdown)
    Markdown,
}

impl PaperFormat {
    /// All formats, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Latex, Self::Html, Self::Markdown];

    /// Map a file extension (without the dot, any case) to a format.
    #[must_use = "returns the detected format, if any"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "tex" | "latex" => Some(Self::Latex),
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Detect the format of a path from its extension.
    ///
    /// Returns `None` for paths without a recognized extension; callers fall
    /// back to [`PaperFormat::default`].
    #[must_use = "returns the detected format, if any"]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions associated with this format.
    #[inline]
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Latex => &["tex"],
            Self::Html => &["html", "htm"],
            Self::Markdown => &["md", "markdown"],
        }
    }

    /// Lowercase identifier used in reports and on the command line.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Latex => "latex",
            Self::Html => "html",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = PaperMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        Self::from_extension(trimmed).ok_or_else(|| {
            PaperMapError::InvalidArgument(format!(
                "unknown paper format '{s}' (expected latex, html or markdown)"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_latex() {
        assert_eq!(PaperFormat::default(), PaperFormat::Latex);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(PaperFormat::from_extension("tex"), Some(PaperFormat::Latex));
        assert_eq!(PaperFormat::from_extension("HTM"), Some(PaperFormat::Html));
        assert_eq!(
            PaperFormat::from_extension("Markdown"),
            Some(PaperFormat::Markdown)
        );
        assert_eq!(PaperFormat::from_extension("pdf"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            PaperFormat::from_path(Path::new("papers/main.TEX")),
            Some(PaperFormat::Latex)
        );
        assert_eq!(
            PaperFormat::from_path(Path::new("2401.00001.html")),
            Some(PaperFormat::Html)
        );
        assert_eq!(PaperFormat::from_path(Path::new("README")), None);
        assert_eq!(PaperFormat::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_from_str_accepts_names_and_dotted_extensions() {
        assert_eq!("latex".parse::<PaperFormat>().unwrap(), PaperFormat::Latex);
        assert_eq!(".md".parse::<PaperFormat>().unwrap(), PaperFormat::Markdown);
        assert_eq!(" html ".parse::<PaperFormat>().unwrap(), PaperFormat::Html);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "docx".parse::<PaperFormat>().unwrap_err();
        assert!(matches!(err, PaperMapError::InvalidArgument(_)));
        assert!(err.to_string().contains("docx"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PaperFormat::Markdown).unwrap();
        assert_eq!(json, "\"markdown\"");
        let back: PaperFormat = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(back, PaperFormat::Html);
    }

    #[test]
    fn test_extensions_round_trip_through_detection() {
        for format in PaperFormat::ALL {
            for ext in format.extensions() {
                assert_eq!(PaperFormat::from_extension(ext), Some(format));
            }
        }
    }
}
