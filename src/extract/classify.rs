//! Paragraph classification heuristics.
//!
//! Authoring tools disagree about what a bullet is: some put a literal glyph
//! in the text, some use a list style, some attach native numbering with no
//! visible marker at all. No single signal is reliable across templates, so
//! bullet detection is a three-way OR over all of them. Each predicate is a
//! pure function of plain data and unit-testable without any document I/O.

use std::sync::OnceLock;

use regex::Regex;

use crate::package::Para;

/// Glyphs recognized as literal bullet markers at the start of a line.
pub const BULLET_GLYPHS: &[char] = &['•', '‣', '▪', '●', '◦', '-', '*', '–', '—'];

/// Professional-network hosts that mark a contact/header line.
const NETWORK_SITES: &[&str] = &["linkedin", "github", "gitlab", "stackoverflow"];

/// Longest line still considered a section heading candidate.
const MAX_HEADING_LEN: usize = 40;

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\+?\d[\d\s().\-]{6,}\d").unwrap())
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text starts with a recognized bullet glyph.
pub fn has_bullet_glyph(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| BULLET_GLYPHS.contains(&c))
}

/// Remove a single leading bullet-glyph-plus-whitespace sequence.
///
/// Internal punctuation is never altered; a glyph with no trailing
/// whitespace is kept, since a bare leading `-` may open a real word.
pub fn strip_bullet_prefix(text: &str) -> String {
    let s = text.trim();
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        if BULLET_GLYPHS.contains(&first) {
            let rest = chars.as_str();
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start().to_string();
            }
            // Glyph-only bullets like "•Shipped" occur in the wild too,
            // but only for markers that cannot start a word.
            if !matches!(first, '-' | '*') && !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    s.to_string()
}

/// Whether the style name suggests list formatting.
pub fn style_looks_like_list(style: Option<&str>) -> bool {
    style.is_some_and(|name| {
        let name = name.to_lowercase();
        name.contains("list") || name.contains("bullet")
    })
}

/// The three-way bullet test: visible glyph, list-ish style name, or native
/// numbering properties. Blank paragraphs are never bullets.
pub fn is_bullet_paragraph(para: &Para) -> bool {
    let text = para.text.trim();
    if text.is_empty() {
        return false;
    }
    has_bullet_glyph(text) || style_looks_like_list(para.style.as_deref()) || para.numbered
}

/// Whether a line looks like resume contact/header material: an email
/// address, a phone-shaped number, or a professional-network site.
pub fn looks_like_contact_line(text: &str) -> bool {
    if text.contains('@') {
        return true;
    }
    if phone_regex().is_match(text) {
        return true;
    }
    let lower = text.to_lowercase();
    NETWORK_SITES.iter().any(|site| lower.contains(site))
}

/// Whether a line is a short ALL-CAPS section heading ("EXPERIENCE",
/// "TECHNICAL SKILLS").
pub fn is_section_heading(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() || t.chars().count() > MAX_HEADING_LEN {
        return false;
    }
    let mut has_alpha = false;
    for c in t.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_alphabetic() {
            has_alpha = true;
        }
    }
    has_alpha
}
