//! # redocx
//!
//! Structure-preserving DOCX reconciliation for resume templates.
//!
//! This library extracts the narrative summary and experience bullet blocks
//! from a DOCX resume, and writes replacement text back into the original
//! bytes without disturbing any formatting: styles, numbering, fonts and
//! layout survive because only run text inside targeted paragraphs changes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redocx::ReplacementSet;
//!
//! fn main() -> redocx::Result<()> {
//!     // Extract the document model
//!     let bytes = std::fs::read("resume.docx")?;
//!     let model = redocx::extract_bytes(&bytes)?;
//!     println!("{}", model.to_json(true)?);
//!
//!     // Rewrite the first experience block
//!     let replacements = ReplacementSet::new()
//!         .with_summary("Engineer focused on reliability.")
//!         .with_block(0, vec!["Rebuilt the ingestion pipeline".to_string()]);
//!     let rewritten = redocx::rewrite_bytes(&bytes, &model, &replacements)?;
//!     std::fs::write("resume.tailored.docx", rewritten)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Format detection**: magic-byte DOCX sniffing before any parsing
//! - **Best-effort extraction**: summary + bullet blocks with paragraph anchors
//! - **Structure preservation**: rewrites keep the template byte-equivalent
//!   outside the replaced text
//! - **Anchor-free recovery**: relocates blocks by exact and fuzzy text match
//! - **Count reconciliation**: replacement lists are padded or truncated to
//!   the template's bullet counts

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod package;
pub mod rewrite;

// Re-export commonly used types
pub use detect::{detect_docx_from_bytes, detect_docx_from_path, is_docx, is_docx_bytes};
pub use error::{Error, Result};
pub use extract::ExtractOptions;
pub use model::{
    BulletBlock, BulletRewrite, DocumentModel, ReplacementSet, SummaryBlock, TailorResponse,
    TailoredExperience,
};
pub use package::{DocxPackage, Para};
pub use rewrite::{RewriteOptions, DEFAULT_FUZZY_THRESHOLD};

use std::path::Path;

/// Extract the document model from a DOCX file.
///
/// # Example
///
/// ```no_run
/// use redocx::extract_file;
///
/// let model = extract_file("resume.docx").unwrap();
/// println!("blocks: {}", model.block_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentModel> {
    let bytes = std::fs::read(path)?;
    extract_bytes(&bytes)
}

/// Extract the document model from DOCX bytes.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentModel> {
    extract_bytes_with_options(data, &ExtractOptions::default())
}

/// Extract the document model from DOCX bytes with custom options.
///
/// # Example
///
/// ```no_run
/// use redocx::{extract_bytes_with_options, ExtractOptions};
///
/// let data = std::fs::read("resume.docx").unwrap();
/// let options = ExtractOptions::new().with_summary_max_paragraphs(2);
/// let model = extract_bytes_with_options(&data, &options).unwrap();
/// ```
pub fn extract_bytes_with_options(data: &[u8], options: &ExtractOptions) -> Result<DocumentModel> {
    detect_docx_from_bytes(data)?;
    let package = DocxPackage::open(data)?;
    let styles = package
        .styles_xml()
        .map(package::scan_styles)
        .unwrap_or_default();
    let paras = package::scan_paragraphs(package.document_xml(), &styles)?;
    Ok(extract::extract_model(&paras, options))
}

/// Apply a replacement set to the original document bytes.
///
/// The model must have been extracted from the same `data`; its paragraph
/// anchors are meaningless against any other buffer.
pub fn rewrite_bytes(
    data: &[u8],
    model: &DocumentModel,
    replacements: &ReplacementSet,
) -> Result<Vec<u8>> {
    rewrite::rewrite(data, model, replacements, &RewriteOptions::default())
}

/// Extract from a file, apply replacements, and write the result.
///
/// # Example
///
/// ```no_run
/// use redocx::{rewrite_file, ReplacementSet};
///
/// let replacements = ReplacementSet::new().with_summary("New summary.");
/// rewrite_file("resume.docx", "out.docx", &replacements).unwrap();
/// ```
pub fn rewrite_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    replacements: &ReplacementSet,
) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let model = extract_bytes(&bytes)?;
    let rewritten = rewrite_bytes(&bytes, &model, replacements)?;
    std::fs::write(output, rewritten)?;
    Ok(())
}

/// Builder for extracting and rewriting DOCX documents.
///
/// # Example
///
/// ```no_run
/// use redocx::{Redocx, ReplacementSet};
///
/// let bytes = std::fs::read("resume.docx").unwrap();
/// let extraction = Redocx::new()
///     .with_summary_max_paragraphs(2)
///     .with_fuzzy_threshold(0.80)
///     .extract_bytes(&bytes)?;
/// let out = extraction.rewrite(&ReplacementSet::new().with_summary("Hi."))?;
/// # Ok::<(), redocx::Error>(())
/// ```
pub struct Redocx {
    extract_options: ExtractOptions,
    rewrite_options: RewriteOptions,
}

impl Redocx {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            rewrite_options: RewriteOptions::default(),
        }
    }

    /// Set the summary scan window.
    pub fn with_summary_scan_limit(mut self, limit: usize) -> Self {
        self.extract_options = self.extract_options.with_summary_scan_limit(limit);
        self
    }

    /// Set the maximum summary paragraph count.
    pub fn with_summary_max_paragraphs(mut self, max: usize) -> Self {
        self.extract_options = self.extract_options.with_summary_max_paragraphs(max);
        self
    }

    /// Set the fuzzy relocation threshold for rewrites.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.rewrite_options = self.rewrite_options.with_fuzzy_threshold(threshold);
        self
    }

    /// Extract a DOCX file and return an extraction wrapper.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<Extraction> {
        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes)
    }

    /// Extract DOCX bytes and return an extraction wrapper.
    pub fn extract_bytes(self, data: &[u8]) -> Result<Extraction> {
        let model = extract_bytes_with_options(data, &self.extract_options)?;
        Ok(Extraction {
            model,
            original: data.to_vec(),
            rewrite_options: self.rewrite_options,
        })
    }
}

impl Default for Redocx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting a document: the model plus the original bytes it is
/// anchored to, ready for a rewrite.
pub struct Extraction {
    /// The extracted document model
    pub model: DocumentModel,
    original: Vec<u8>,
    rewrite_options: RewriteOptions,
}

impl Extraction {
    /// Get the extracted model.
    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    /// The original document bytes the model was extracted from.
    pub fn original_bytes(&self) -> &[u8] {
        &self.original
    }

    /// Serialize the model to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        self.model.to_json(pretty)
    }

    /// Apply a replacement set against the original bytes.
    pub fn rewrite(&self, replacements: &ReplacementSet) -> Result<Vec<u8>> {
        rewrite::rewrite(&self.original, &self.model, replacements, &self.rewrite_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redocx_builder() {
        let builder = Redocx::new()
            .with_summary_max_paragraphs(2)
            .with_fuzzy_threshold(0.85);

        assert_eq!(builder.extract_options.summary_max_paragraphs, 2);
        assert!((builder.rewrite_options.fuzzy_threshold - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_redocx_builder_default() {
        let builder = Redocx::default();
        assert_eq!(builder.extract_options.summary_scan_limit, 40);
        assert!(
            (builder.rewrite_options.fuzzy_threshold - DEFAULT_FUZZY_THRESHOLD).abs()
                < f64::EPSILON
        );
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_bytes_empty_data() {
        let data: [u8; 0] = [];
        let result = extract_bytes(&data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_not_a_zip() {
        let result = extract_bytes(b"%PDF-1.7 definitely not a docx");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_truncated_magic() {
        let result = extract_bytes(b"PK");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_builder_extract_invalid_bytes() {
        let result = Redocx::new().extract_bytes(b"not a docx");
        assert!(result.is_err());
    }
}
