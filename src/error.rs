//! Error types for the redocx library.

use std::io;
use thiserror::Error;

/// Result type alias for redocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while opening or rewriting DOCX packages.
///
/// Heuristic failures (unmatched bullets, odd paragraph streams) never show
/// up here; extraction and rewriting degrade to smaller result sets instead.
/// Only container-level corruption is fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a DOCX (OOXML) package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The ZIP container could not be read or written.
    #[error("Package error: {0}")]
    Package(#[from] zip::result::ZipError),

    /// A required package part is missing (e.g. word/document.xml).
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The XML content of a package part could not be parsed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The package structure is corrupted beyond recovery.
    #[error("Corrupted package: {0}")]
    Corrupted(String),

    /// Error while re-emitting a rewritten package part.
    #[error("Rewrite error: {0}")]
    Rewrite(String),

    /// Error while serializing or deserializing the document model.
    #[error("Model error: {0}")]
    Model(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(err))
    }
}
