//! Document-level information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page yielding at most this many characters of text counts as blank.
pub(crate) const BLANK_TEXT_THRESHOLD: usize = 50;

/// Metadata and status for an open document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title.
    pub title: Option<String>,

    /// Document author.
    pub author: Option<String>,

    /// Creator application.
    pub creator: Option<String>,

    /// PDF producer.
    pub producer: Option<String>,

    /// Creation date.
    pub created: Option<DateTime<Utc>>,

    /// Last modification date.
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g. "1.7").
    pub pdf_version: String,

    /// Total number of pages.
    pub page_count: usize,

    /// Whether the document is encrypted.
    pub encrypted: bool,

    /// Whether no page carries more than a trivial amount of text.
    pub blank: bool,
}

/// Collect metadata from the document's Info dictionary.
pub(crate) fn collect(doc: &lopdf::Document, blank: bool) -> DocumentInfo {
    let mut info = DocumentInfo {
        pdf_version: doc.version.to_string(),
        page_count: doc.get_pages().len(),
        encrypted: doc.is_encrypted(),
        blank,
        ..Default::default()
    };

    if let Ok(info_ref) = doc.trailer.get(b"Info").and_then(|o| o.as_reference()) {
        if let Ok(dict) = doc.get_dictionary(info_ref) {
            info.title = dict_string(dict, b"Title");
            info.author = dict_string(dict, b"Author");
            info.creator = dict_string(dict, b"Creator");
            info.producer = dict_string(dict, b"Producer");
            info.created = dict_string(dict, b"CreationDate").and_then(|s| parse_pdf_date(&s));
            info.modified = dict_string(dict, b"ModDate").and_then(|s| parse_pdf_date(&s));
        }
    }

    info
}

/// Read a string value from a PDF dictionary, handling UTF-16BE.
fn dict_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .filter_map(|c| {
                        if c.len() == 2 {
                            Some(u16::from_be_bytes([c[0], c[1]]))
                        } else {
                            None
                        }
                    })
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSS...).
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:")?;
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|v| v.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|v| v.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|v| v.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|v| v.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|v| v.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
