//! Access to the external PDF library.
//!
//! [`PageSource`] is the seam between this crate and the library that does
//! the actual PDF byte-structure work. Everything above it (span reading,
//! table detection) sees pages, content operations, and decoded text, never
//! concrete library types. [`LopdfSource`] is the lopdf-backed
//! implementation.

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier used by the backing library: (object number, generation).
pub type PageId = (u32, u16);

/// A value from a content stream operand.
#[derive(Debug, Clone)]
pub enum OpValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<OpValue>),
    Other,
}

impl OpValue {
    /// Numeric value of this operand, if it is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            OpValue::Integer(i) => Some(*i as f32),
            OpValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a page content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<OpValue>,
}

/// Interface to the backing PDF library.
///
/// Implementations expose page enumeration, decoded content stream
/// operations, and font-aware text decoding without leaking library types.
pub trait PageSource {
    /// Pages in document order as (1-based page number, page id).
    fn pages(&self) -> Vec<(u32, PageId)>;

    /// Decoded content stream operations for a page.
    fn operations(&self, page: PageId) -> Result<Vec<ContentOp>>;

    /// Decode a text operand using the encoding of the named page font,
    /// falling back to byte-level decoding when the font is unavailable.
    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String;

    /// Plain text of a page as extracted by the backing library.
    fn page_text(&self, page_number: u32) -> Result<String>;
}

/// Byte-level text decoding used when no font encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
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
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Concrete [`PageSource`] backed by `lopdf::Document`.
///
/// The document handle lives exactly as long as this value; dropping it
/// releases the parsed document on every exit path.
pub struct LopdfSource {
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Load a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Load a document from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Direct access to the underlying `lopdf::Document`.
    ///
    /// Escape hatch for operations not covered by [`PageSource`]
    /// (metadata, encryption status).
    pub fn doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// PDF version string from the document header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Parse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::Content(e.to_string()))?;

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => s
                    .decompressed_content()
                    .map_err(|e| Error::Content(e.to_string())),
                _ => Err(Error::Content("invalid content stream".to_string())),
            },
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::Content("invalid content stream".to_string())),
        }
    }
}

impl PageSource for LopdfSource {
    fn pages(&self) -> Vec<(u32, PageId)> {
        self.doc.get_pages().into_iter().collect()
    }

    fn operations(&self, page: PageId) -> Result<Vec<ContentOp>> {
        let data = self.page_content(page)?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::Content(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = fonts.get(font) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::Parse(format!("page {}: {}", page_number, e)))
    }
}

/// Convert a `lopdf::Object` operand to an [`OpValue`].
fn convert_object(obj: &Object) -> OpValue {
    match obj {
        Object::Integer(i) => OpValue::Integer(*i),
        Object::Real(r) => OpValue::Real(*r),
        Object::Name(n) => OpValue::Name(n.clone()),
        Object::String(b, _) => OpValue::Str(b.clone()),
        Object::Array(arr) => OpValue::Array(arr.iter().map(convert_object).collect()),
        _ => OpValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_op_value_as_number() {
        assert_eq!(OpValue::Integer(42).as_number(), Some(42.0));
        assert_eq!(OpValue::Real(3.5).as_number(), Some(3.5));
        assert_eq!(OpValue::Other.as_number(), None);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(LopdfSource::from_bytes(b"not a pdf at all").is_err());
    }
}
