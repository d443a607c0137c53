//! Paragraph stream scanning.
//!
//! Walks `word/document.xml` and produces one flat, owned record per
//! body-level paragraph. Paragraphs nested in tables are skipped; the model
//! only covers the flat stream, and the rewrite pass counts paragraphs with
//! the same rule so indices always line up.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;

/// One paragraph record from the scanned document.
///
/// Mirrors what the heuristics need: visible text, a resolved style name,
/// whether native list numbering is attached, and how many direct text runs
/// the paragraph owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Para {
    /// Position in the body-level paragraph stream.
    pub index: usize,

    /// Concatenated text of the paragraph's direct runs. Tabs and breaks
    /// map to `\t` and `\n`.
    pub text: String,

    /// Style name, resolved through styles.xml when possible, otherwise the
    /// raw style id.
    pub style: Option<String>,

    /// Whether the paragraph carries native list/numbering properties
    /// (`w:numPr`), independent of any visible glyph.
    pub numbered: bool,

    /// Number of direct `w:r` runs.
    pub run_count: usize,
}

impl Para {
    /// Create a plain text paragraph record (test and bench helper).
    pub fn with_text(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            run_count: 1,
            ..Default::default()
        }
    }

    /// Set the style name.
    pub fn styled(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Mark the paragraph as list-numbered.
    pub fn numbered(mut self) -> Self {
        self.numbered = true;
        self
    }
}

/// Parse `word/styles.xml` into a styleId -> display-name map.
///
/// Word references styles by id (`ListParagraph`) while authoring tools and
/// users see display names (`List Paragraph`); the list/bullet heuristics
/// match against the display name. Unparseable content yields an empty map
/// rather than an error.
pub fn scan_styles(styles_xml: &[u8]) -> HashMap<String, String> {
    let mut styles = HashMap::new();
    let mut reader = Reader::from_reader(styles_xml);
    let mut buf = Vec::new();

    let mut current_id: Option<String> = None;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                current_id = attr_value(&e, b"w:styleId");
            }
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"w:name" => {
                if let (Some(id), Some(name)) = (current_id.as_ref(), attr_value(&e, b"w:val")) {
                    styles.insert(id.clone(), name);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => {
                current_id = None;
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    styles
}

/// Scan the main document part into paragraph records.
pub fn scan_paragraphs(
    document_xml: &[u8],
    styles: &HashMap<String, String>,
) -> Result<Vec<Para>> {
    let mut reader = Reader::from_reader(document_xml);
    let mut buf = Vec::new();

    let mut paras: Vec<Para> = Vec::new();
    let mut table_depth = 0usize;
    let mut current: Option<Para> = None;
    // Element names on the path from the open w:p to the cursor.
    let mut stack: Vec<Vec<u8>> = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"w:tbl" {
                    table_depth += 1;
                } else if name == b"w:p" && table_depth == 0 && current.is_none() {
                    current = Some(Para {
                        index: paras.len(),
                        ..Default::default()
                    });
                    stack.clear();
                } else if let Some(para) = current.as_mut() {
                    if name == b"w:r" && stack.is_empty() {
                        para.run_count += 1;
                    }
                    stack.push(name);
                }
            }
            Event::Empty(e) => {
                let qname = e.name();
                let name = qname.as_ref();
                if name == b"w:p" && table_depth == 0 && current.is_none() {
                    paras.push(Para {
                        index: paras.len(),
                        ..Default::default()
                    });
                } else if let Some(para) = current.as_mut() {
                    match name {
                        b"w:pStyle" if stack.last().map(Vec::as_slice) == Some(b"w:pPr") => {
                            if let Some(id) = attr_value(&e, b"w:val") {
                                para.style =
                                    Some(styles.get(&id).cloned().unwrap_or(id));
                            }
                        }
                        b"w:numPr" if stack.last().map(Vec::as_slice) == Some(b"w:pPr") => {
                            para.numbered = true;
                        }
                        b"w:tab" if in_direct_run(&stack) => para.text.push('\t'),
                        b"w:br" | b"w:cr" if in_direct_run(&stack) => para.text.push('\n'),
                        b"w:r" if stack.is_empty() => para.run_count += 1,
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if let Some(para) = current.as_mut() {
                    if stack.first().map(Vec::as_slice) == Some(b"w:r")
                        && stack.last().map(Vec::as_slice) == Some(b"w:t")
                    {
                        para.text.push_str(&e.unescape().unwrap_or_default());
                    }
                }
            }
            Event::End(e) => {
                let qname = e.name();
                let name = qname.as_ref();
                if name == b"w:tbl" {
                    table_depth = table_depth.saturating_sub(1);
                } else if name == b"w:p" && current.is_some() && stack.is_empty() {
                    if let Some(para) = current.take() {
                        paras.push(para);
                    }
                } else if current.is_some() {
                    // numPr may arrive as a start/end pair instead of empty.
                    if name == b"w:numPr"
                        && stack.last().map(Vec::as_slice) == Some(b"w:numPr")
                    {
                        if let Some(para) = current.as_mut() {
                            para.numbered = true;
                        }
                    }
                    stack.pop();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paras)
}

/// Whether the cursor sits inside a direct `w:r` child of the open paragraph.
fn in_direct_run(stack: &[Vec<u8>]) -> bool {
    stack.first().map(Vec::as_slice) == Some(b"w:r")
}

/// Read an attribute value, unescaped.
fn attr_value(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
}
