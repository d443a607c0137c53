//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Offset of the file-name length field in a ZIP local file header.
const NAME_LEN_OFFSET: usize = 26;

/// Offset of the file name in a ZIP local file header.
const NAME_OFFSET: usize = 30;

/// Part name that identifies an OOXML package. Word writes it as the first
/// entry, which lets us detect DOCX without unpacking the archive.
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Detect whether a file is a DOCX package.
///
/// Reads only the first local file header, so this never decompresses
/// anything.
///
/// # Example
/// ```no_run
/// use redocx::detect::detect_docx_from_path;
///
/// detect_docx_from_path("resume.docx").unwrap();
/// ```
pub fn detect_docx_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 64];
    let n = reader.read(&mut header)?;
    detect_docx_from_bytes(&header[..n])
}

/// Detect whether bytes are the start of a DOCX package.
///
/// # Returns
/// * `Ok(())` if the data starts with a ZIP header whose first entry is
///   `[Content_Types].xml`
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_docx_from_bytes(data: &[u8]) -> Result<()> {
    if data.len() < NAME_OFFSET || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let name_len = u16::from_le_bytes([data[NAME_LEN_OFFSET], data[NAME_LEN_OFFSET + 1]]) as usize;
    let end = NAME_OFFSET + name_len;
    if end > data.len() {
        // Truncated header but a plausible ZIP; let the package layer decide.
        return Ok(());
    }

    let first_name = &data[NAME_OFFSET..end];
    if first_name == CONTENT_TYPES_PART.as_bytes() {
        return Ok(());
    }

    // Some producers reorder entries; accept any ZIP that at least mentions
    // the content-types part somewhere in the probed window.
    if data
        .windows(CONTENT_TYPES_PART.len())
        .any(|w| w == CONTENT_TYPES_PART.as_bytes())
    {
        return Ok(());
    }

    Err(Error::UnknownFormat)
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_docx_from_path(path).is_ok()
}

/// Check if bytes represent a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_docx_from_bytes(data).is_ok()
}
