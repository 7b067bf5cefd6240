//! # pdfgrid
//!
//! Table extraction from PDF documents.
//!
//! This library opens a PDF, finds tables on a page from text alignment
//! alone, and flattens them into plain cell lists. The PDF byte structure
//! itself (xref tables, filters, encryption) is handled by `lopdf`; this
//! crate works on positioned text.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pdfgrid::Result<()> {
//!     // First table on the first page, one string per cell, row-major.
//!     let cells = pdfgrid::extract_cells("report.pdf", 0)?;
//!     for cell in cells {
//!         println!("{}", cell);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior
//!
//! - Page indices are zero-based.
//! - An out-of-range page or a page without a detectable table yields an
//!   empty list, not an error.
//! - Missing cells inside a table become empty strings when flattened;
//!   [`Table`] keeps them as `None`.
//! - Errors from opening or parsing the file propagate unchanged.

pub mod detect;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod info;
pub mod options;
pub mod source;
pub mod spans;
pub mod table;

pub use detector::TableDetector;
pub use error::{Error, Result};
pub use extractor::TableExtractor;
pub use info::DocumentInfo;
pub use options::{DetectorConfig, ExtractOptions};
pub use spans::TextSpan;
pub use table::{Table, TableCell, TableRow};

use std::path::Path;

/// Flatten the first table on a page into cell strings.
///
/// Opens the document, checks the zero-based page index against the page
/// count, takes the first detected table, and returns its cells in
/// row-major order with missing values mapped to empty strings. The
/// document handle is scoped to this call.
///
/// # Example
///
/// ```no_run
/// let cells = pdfgrid::extract_cells("tables.pdf", 0).unwrap();
/// assert_eq!(cells.len() % 2, 0); // rows x columns
/// ```
pub fn extract_cells<P: AsRef<Path>>(path: P, page_index: usize) -> Result<Vec<String>> {
    let extractor = TableExtractor::open(path)?;
    extractor.extract_cells(page_index)
}

/// Flatten the first table on a page, with custom options.
pub fn extract_cells_with_options<P: AsRef<Path>>(
    path: P,
    page_index: usize,
    options: ExtractOptions,
) -> Result<Vec<String>> {
    let extractor = TableExtractor::open_with_options(path, options)?;
    extractor.extract_cells(page_index)
}

/// All tables detected on a page.
pub fn extract_tables<P: AsRef<Path>>(path: P, page_index: usize) -> Result<Vec<Table>> {
    let extractor = TableExtractor::open(path)?;
    extractor.extract_tables(page_index)
}

/// Metadata and status for a document.
pub fn document_info<P: AsRef<Path>>(path: P) -> Result<DocumentInfo> {
    let extractor = TableExtractor::open(path)?;
    Ok(extractor.info())
}
