//! ZIP container handling for DOCX packages.

use std::io::{Cursor, Read, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Main document part of an OOXML word-processing package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";

/// An opened DOCX package with all parts held in memory.
///
/// Documents are small (a resume is a few hundred KB at most), so parts are
/// read eagerly. Saving re-packs every part unchanged except the main
/// document, which keeps relationships, media, numbering definitions and
/// metadata exactly as uploaded.
pub struct DocxPackage {
    entries: Vec<(String, Vec<u8>)>,
}

impl DocxPackage {
    /// Open a package from raw bytes.
    ///
    /// Fails with [`Error::UnknownFormat`] when the bytes are not a readable
    /// ZIP archive and [`Error::MissingPart`] when the archive has no main
    /// document part. This is the only hard failure point of the core;
    /// everything past here degrades instead of erroring.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| match e {
            ZipError::InvalidArchive(_) => Error::UnknownFormat,
            other => Error::Package(other),
        })?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push((name, data));
        }

        let package = Self { entries };
        if package.part(DOCUMENT_PART).is_none() {
            return Err(Error::MissingPart(DOCUMENT_PART.to_string()));
        }
        Ok(package)
    }

    /// Look up a part by name.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// The main document part. Validated to exist at open time.
    pub fn document_xml(&self) -> &[u8] {
        self.part(DOCUMENT_PART).unwrap_or_default()
    }

    /// The styles part, when present.
    pub fn styles_xml(&self) -> Option<&[u8]> {
        self.part(STYLES_PART)
    }

    /// Names of all parts in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Re-pack the archive with a replacement main document part.
    ///
    /// Every other part is copied verbatim in its original order.
    pub fn save_with_document(&self, document_xml: &[u8]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for (name, data) in &self.entries {
            writer.start_file(name.as_str(), options)?;
            if name == DOCUMENT_PART {
                writer.write_all(document_xml)?;
            } else {
                writer.write_all(data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer
            .start_file("[Content_Types].xml", options)
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_and_read_part() {
        let bytes = minimal_docx("<w:document/>");
        let package = DocxPackage::open(&bytes).unwrap();
        assert_eq!(package.document_xml(), b"<w:document/>");
        assert!(package.styles_xml().is_none());
    }

    #[test]
    fn test_open_rejects_garbage() {
        let result = DocxPackage::open(b"this is not a zip archive");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_open_rejects_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxPackage::open(&bytes);
        assert!(matches!(result, Err(Error::MissingPart(_))));
    }

    #[test]
    fn test_save_replaces_only_document() {
        let bytes = minimal_docx("<w:document>old</w:document>");
        let package = DocxPackage::open(&bytes).unwrap();

        let out = package
            .save_with_document(b"<w:document>new</w:document>")
            .unwrap();
        let reopened = DocxPackage::open(&out).unwrap();

        assert_eq!(reopened.document_xml(), b"<w:document>new</w:document>");
        assert_eq!(reopened.part("[Content_Types].xml").unwrap(), b"<Types/>");
        assert_eq!(
            reopened.part_names().collect::<Vec<_>>(),
            package.part_names().collect::<Vec<_>>()
        );
    }
}
