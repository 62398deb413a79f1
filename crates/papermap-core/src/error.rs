//! Error types for paper structure parsing.
//!
//! Parsing itself is tolerant: malformed markup never produces an error. The
//! variants here cover the surrounding cases, namely missing input, bad
//! arguments, I/O and report serialization.

use thiserror::Error;

/// Error types that can occur while loading or parsing a paper.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: StructureConverter is in papermap-backend crate
/// use papermap_backend::{PaperSource, StructureConverter};
/// use papermap_core::PaperMapError;
///
/// let converter = StructureConverter::new();
///
/// match converter.parse_source(&PaperSource::default(), None) {
///     Err(PaperMapError::NotFound(msg)) => eprintln!("Nothing to parse: {msg}"),
///     Err(e) => eprintln!("Other error: {e}"),
///     Ok(structure) => println!("{} sections", structure.section_count()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PaperMapError {
    /// Referenced input is absent.
    ///
    /// Raised when the caller supplied neither a path nor literal content, or
    /// when the supplied path does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An argument could not be interpreted, such as an unknown format name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File I/O error while reading an existing input file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Type alias for [`Result<T, PaperMapError>`].
pub type Result<T> = std::result::Result<T, PaperMapError>;
