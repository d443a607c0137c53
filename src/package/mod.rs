//! OOXML package layer.
//!
//! A DOCX file is a ZIP archive; the flat paragraph stream lives in
//! `word/document.xml` and style definitions in `word/styles.xml`. This
//! module owns all container and XML plumbing: opening the archive, scanning
//! the paragraph stream into plain records, patching paragraph text in place,
//! and emitting a new archive.
//!
//! The crate parses and re-emits the XML manually with `quick-xml` events;
//! rewriting streams the original document part through a writer untouched
//! except inside targeted paragraphs, which is what keeps every non-text
//! property (styles, numbering, run formatting) byte-equivalent.

mod archive;
mod paragraph;
mod surgery;

pub use archive::DocxPackage;
pub use paragraph::{scan_paragraphs, scan_styles, Para};
pub use surgery::rewrite_paragraph_texts;
