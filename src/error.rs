//! Error types for the pdfgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening a document or extracting tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF library failed to parse the document structure.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// A page content stream could not be decoded.
    #[error("Content stream error: {0}")]
    Content(String),

    /// Error serializing extraction results.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Parse(err.to_string()),
        }
    }
}
