//! The table extractor: a scoped document handle plus the flatten contract.

use std::path::Path;

use rayon::prelude::*;

use crate::detect;
use crate::detector::TableDetector;
use crate::error::Result;
use crate::info::{self, DocumentInfo, BLANK_TEXT_THRESHOLD};
use crate::options::ExtractOptions;
use crate::source::{LopdfSource, PageSource};
use crate::spans::SpanReader;
use crate::table::Table;

/// Extracts tables from a PDF document.
///
/// The document handle lives exactly as long as this value and is released
/// when it drops, on success and failure alike. Page indices in the public
/// API are zero-based.
pub struct TableExtractor {
    source: LopdfSource,
    options: ExtractOptions,
}

impl TableExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        detect::probe_path(path)?;
        Ok(Self {
            source: LopdfSource::open(path)?,
            options,
        })
    }

    /// Open a document held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Open a document held in memory with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        detect::probe_bytes(data)?;
        Ok(Self {
            source: LopdfSource::from_bytes(data)?,
            options,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.source.pages().len()
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.source.is_encrypted()
    }

    /// All tables detected on a zero-indexed page, top to bottom.
    ///
    /// A page index at or past the end of the document yields no tables.
    pub fn extract_tables(&self, page_index: usize) -> Result<Vec<Table>> {
        let pages = self.source.pages();
        let Some((_, page_id)) = pages.get(page_index) else {
            log::debug!(
                "page {} out of range, document has {} pages",
                page_index,
                pages.len()
            );
            return Ok(Vec::new());
        };

        let spans = SpanReader::new(&self.source).read_page(*page_id)?;
        let detector = TableDetector::with_config(self.options.detector.clone());
        Ok(detector.detect(&spans))
    }

    /// Flatten the first table on a zero-indexed page into cell strings.
    ///
    /// Cells come out in row-major order; missing cells become empty
    /// strings. Out-of-range pages and pages without a detectable table
    /// yield an empty list. Further tables on the page, if any, are
    /// reachable through [`extract_tables`](Self::extract_tables).
    pub fn extract_cells(&self, page_index: usize) -> Result<Vec<String>> {
        let tables = self.extract_tables(page_index)?;
        Ok(tables.first().map(Table::flatten).unwrap_or_default())
    }

    /// Scan every page for tables, pairing each with its page index.
    ///
    /// Pages are processed in parallel unless the options ask for
    /// sequential scanning.
    pub fn extract_all_tables(&self) -> Result<Vec<(usize, Table)>> {
        let page_count = self.page_count();
        let per_page: Vec<Vec<Table>> = if self.options.parallel {
            (0..page_count)
                .into_par_iter()
                .map(|i| self.extract_tables(i))
                .collect::<Result<_>>()?
        } else {
            (0..page_count)
                .map(|i| self.extract_tables(i))
                .collect::<Result<_>>()?
        };

        Ok(per_page
            .into_iter()
            .enumerate()
            .flat_map(|(i, tables)| tables.into_iter().map(move |t| (i, t)))
            .collect())
    }

    /// Check whether the document is effectively blank: no page yields more
    /// than a trivial amount of text.
    pub fn is_blank(&self) -> bool {
        let pages = self.source.pages();
        if pages.is_empty() {
            return true;
        }
        pages.iter().all(|(number, _)| {
            match self.source.page_text(*number) {
                Ok(text) => text.trim().chars().count() <= BLANK_TEXT_THRESHOLD,
                Err(err) => {
                    log::warn!("failed to read text of page {}: {}", number, err);
                    true
                }
            }
        })
    }

    /// Metadata and status for the document.
    pub fn info(&self) -> DocumentInfo {
        info::collect(self.source.doc(), self.is_blank())
    }
}
