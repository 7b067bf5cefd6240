//! PDF header detection.
//!
//! Cheap validation of the `%PDF-` magic before a file is handed to the
//! PDF library proper.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes at the start of every document.
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Length of the version field following the magic, e.g. "1.7".
const VERSION_LEN: usize = 3;

/// Read the header of a file and return its PDF version string.
///
/// Fails with [`Error::UnknownFormat`] when the file does not start with a
/// PDF header.
pub fn probe_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    let n = reader.read(&mut header)?;
    probe_bytes(&header[..n])
}

/// Return the PDF version string from a byte buffer holding the start of a
/// document.
pub fn probe_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    let chars: Vec<char> = version.chars().collect();
    if chars.len() != 3 || !chars[0].is_ascii_digit() || chars[1] != '.' || !chars[2].is_ascii_digit()
    {
        return Err(Error::UnknownFormat);
    }

    Ok(version)
}

/// Check whether a file starts with a valid PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    probe_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_valid_header() {
        let version = probe_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(version, "1.7");

        let version = probe_bytes(b"%PDF-2.0\n").unwrap();
        assert_eq!(version, "2.0");
    }

    #[test]
    fn test_probe_invalid_header() {
        assert!(matches!(
            probe_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(probe_bytes(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(probe_bytes(b""), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_probe_bad_version() {
        assert!(matches!(
            probe_bytes(b"%PDF-abc\n"),
            Err(Error::UnknownFormat)
        ));
    }
}
