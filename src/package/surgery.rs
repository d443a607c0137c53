//! In-place paragraph text replacement.
//!
//! Streams `word/document.xml` through a writer, echoing every event
//! verbatim except inside targeted paragraphs. There the first direct run
//! keeps its run properties and receives the replacement text, remaining
//! direct runs are dropped, and a paragraph with no runs gets one appended.
//! Paragraph properties (`w:pPr`, so style and numbering) are never touched,
//! which is what preserves bullet and list rendering.

use std::collections::HashMap;
use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::Result;

/// Replace the visible text of selected body-level paragraphs.
///
/// `edits` maps paragraph index (same counting rule as the scanner: flat
/// body stream, table content excluded) to the replacement text. Indices
/// with no matching paragraph are ignored. Returns the rewritten part.
pub fn rewrite_paragraph_texts(
    document_xml: &[u8],
    edits: &HashMap<usize, String>,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(document_xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    let mut para_index = 0usize;
    let mut table_depth = 0usize;
    // Replacement text for the paragraph currently open, if targeted.
    let mut target: Option<String> = None;
    // Path from the open target paragraph down to the cursor.
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_first_run = false;
    let mut in_first_run = false;
    let mut in_rpr = false;
    // Depth tracking for an open untargeted paragraph (echoed verbatim).
    let mut in_plain_para = false;
    let mut plain_depth = 0usize;
    // When > 0, the cursor is inside a subtree being dropped.
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Eof => break,

            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if in_plain_para {
                    plain_depth += 1;
                    writer.write_event(Event::Start(e))?;
                } else if let Some(_text) = target.as_ref() {
                    let name = e.name().as_ref().to_vec();
                    if name == b"w:r" && stack.is_empty() {
                        if seen_first_run {
                            // Extra direct run: drop it whole.
                            skip_depth = 1;
                        } else {
                            seen_first_run = true;
                            in_first_run = true;
                            stack.push(name);
                            writer.write_event(Event::Start(e))?;
                        }
                    } else if in_first_run && !in_rpr {
                        if name == b"w:rPr" {
                            in_rpr = true;
                            stack.push(name);
                            writer.write_event(Event::Start(e))?;
                        } else {
                            // Old run content (w:t and friends): drop.
                            skip_depth = 1;
                        }
                    } else {
                        stack.push(name);
                        writer.write_event(Event::Start(e))?;
                    }
                } else {
                    let qname = e.name();
                    let name = qname.as_ref();
                    if name == b"w:tbl" {
                        table_depth += 1;
                    } else if name == b"w:p" && table_depth == 0 {
                        match edits.get(&para_index) {
                            Some(text) => {
                                target = Some(text.clone());
                                stack.clear();
                                seen_first_run = false;
                                in_first_run = false;
                                in_rpr = false;
                            }
                            None => {
                                in_plain_para = true;
                                plain_depth = 0;
                            }
                        }
                        para_index += 1;
                    }
                    writer.write_event(Event::Start(e))?;
                }
            }

            Event::Empty(e) => {
                if skip_depth > 0 {
                    // Dropped subtree.
                } else if in_plain_para {
                    writer.write_event(Event::Empty(e))?;
                } else if target.is_some() {
                    let qname = e.name();
                    let name = qname.as_ref();
                    if name == b"w:r" && stack.is_empty() {
                        // Childless run carries neither text nor formatting.
                    } else if in_first_run && !in_rpr && name != b"w:rPr" {
                        // Old run content such as w:tab or w:br: drop.
                    } else {
                        writer.write_event(Event::Empty(e))?;
                    }
                } else {
                    let qname = e.name();
                    let name = qname.as_ref();
                    if name == b"w:p" && table_depth == 0 {
                        if let Some(text) = edits.get(&para_index) {
                            // Self-closing target paragraph: give it a run.
                            writer.write_event(Event::Start(e.clone()))?;
                            write_text_run(&mut writer, text)?;
                            writer.write_event(Event::End(BytesEnd::new("w:p")))?;
                        } else {
                            writer.write_event(Event::Empty(e))?;
                        }
                        para_index += 1;
                    } else {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
            }

            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else if in_plain_para {
                    if plain_depth == 0 && e.name().as_ref() == b"w:p" {
                        in_plain_para = false;
                    } else {
                        plain_depth = plain_depth.saturating_sub(1);
                    }
                    writer.write_event(Event::End(e))?;
                } else if let Some(text) = target.clone() {
                    let qname = e.name();
                    let name = qname.as_ref();
                    if name == b"w:r" && in_first_run && stack.len() == 1 {
                        // Close of the kept run: inject the new text.
                        write_text(&mut writer, &text)?;
                        in_first_run = false;
                        stack.pop();
                        writer.write_event(Event::End(e))?;
                    } else if name == b"w:rPr" && in_rpr {
                        in_rpr = false;
                        stack.pop();
                        writer.write_event(Event::End(e))?;
                    } else if name == b"w:p" && stack.is_empty() {
                        if !seen_first_run {
                            // Paragraph had no runs at all.
                            write_text_run(&mut writer, &text)?;
                        }
                        target = None;
                        writer.write_event(Event::End(e))?;
                    } else {
                        stack.pop();
                        writer.write_event(Event::End(e))?;
                    }
                } else {
                    if e.name().as_ref() == b"w:tbl" {
                        table_depth = table_depth.saturating_sub(1);
                    }
                    writer.write_event(Event::End(e))?;
                }
            }

            Event::Text(e) => {
                if skip_depth == 0 {
                    writer.write_event(Event::Text(e))?;
                }
            }

            Event::CData(e) => {
                if skip_depth == 0 {
                    writer.write_event(Event::CData(e))?;
                }
            }

            other => {
                if skip_depth == 0 {
                    writer.write_event(other)?;
                }
            }
        }
        buf.clear();
    }

    Ok(writer.into_inner().into_inner())
}

/// Emit `<w:t xml:space="preserve">text</w:t>`.
fn write_text(writer: &mut Writer<Cursor<Vec<u8>>>, text: &str) -> Result<()> {
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    Ok(())
}

/// Emit `<w:r><w:t ...>text</w:t></w:r>`.
fn write_text_run(writer: &mut Writer<Cursor<Vec<u8>>>, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    write_text(writer, text)?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}
