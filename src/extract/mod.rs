//! Document model extraction.
//!
//! Turns an opened paragraph stream into a [`DocumentModel`]: the leading
//! summary block plus ordered experience blocks. Extraction is best-effort
//! by contract; an unusual document yields an empty summary and no blocks,
//! never an error.

pub mod classify;

use crate::model::{BulletBlock, DocumentModel, SummaryBlock};
use crate::package::Para;

use classify::{
    is_bullet_paragraph, is_section_heading, looks_like_contact_line, normalize_ws,
    strip_bullet_prefix,
};

/// Options for model extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How many leading paragraphs the summary scan may look at. Long
    /// documents are never scanned end-to-end for a summary.
    pub summary_scan_limit: usize,

    /// Maximum number of paragraphs captured into the summary.
    pub summary_max_paragraphs: usize,
}

impl ExtractOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary scan window.
    pub fn with_summary_scan_limit(mut self, limit: usize) -> Self {
        self.summary_scan_limit = limit;
        self
    }

    /// Set the maximum summary paragraph count.
    pub fn with_summary_max_paragraphs(mut self, max: usize) -> Self {
        self.summary_max_paragraphs = max;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            summary_scan_limit: 40,
            summary_max_paragraphs: 3,
        }
    }
}

/// Build a document model from a scanned paragraph stream.
pub fn extract_model(paras: &[Para], options: &ExtractOptions) -> DocumentModel {
    DocumentModel {
        summary: detect_summary(paras, options),
        experiences: segment_blocks(paras),
    }
}

/// Walk the paragraph stream and group bullet runs into experience blocks.
///
/// A blank paragraph closes the open block; a non-bullet paragraph closes it
/// too and becomes the header candidate for the next one. Blocks are only
/// emitted once they hold at least one bullet.
pub fn segment_blocks(paras: &[Para]) -> Vec<BulletBlock> {
    let mut blocks: Vec<BulletBlock> = Vec::new();
    let mut current: Option<BulletBlock> = None;
    let mut prev_nonbullet = String::new();

    for para in paras {
        let text = normalize_ws(&para.text);
        if text.is_empty() {
            if let Some(block) = current.take() {
                if block.bullet_count() > 0 {
                    blocks.push(block);
                }
            }
            continue;
        }

        if is_bullet_paragraph(para) {
            let block = current.get_or_insert_with(|| BulletBlock::with_header(&prev_nonbullet));
            block.push_bullet(strip_bullet_prefix(&text), para.index);
        } else {
            if let Some(block) = current.take() {
                if block.bullet_count() > 0 {
                    blocks.push(block);
                }
            }
            prev_nonbullet = text;
        }
    }

    if let Some(block) = current.take() {
        if block.bullet_count() > 0 {
            blocks.push(block);
        }
    }

    blocks
}

/// Detect the leading narrative summary.
///
/// Skips contact/header lines until the first paragraph that does not look
/// like one, then collects up to `summary_max_paragraphs` consecutive
/// non-bullet, non-heading paragraphs. Stops at the first bullet without
/// including it.
pub fn detect_summary(paras: &[Para], options: &ExtractOptions) -> SummaryBlock {
    let mut lines: Vec<String> = Vec::new();
    let mut idxs: Vec<usize> = Vec::new();
    let mut past_header = false;

    for para in paras.iter().take(options.summary_scan_limit) {
        let text = normalize_ws(&para.text);
        if text.is_empty() {
            if !lines.is_empty() {
                break;
            }
            continue;
        }

        if !past_header {
            if looks_like_contact_line(&text) {
                continue;
            }
            past_header = true;
        }

        if is_bullet_paragraph(para) {
            break;
        }
        if is_section_heading(&text) {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        // Contact fragments can trail the header block as well.
        if looks_like_contact_line(&text) && lines.is_empty() {
            continue;
        }

        lines.push(text);
        idxs.push(para.index);
        if lines.len() >= options.summary_max_paragraphs {
            break;
        }
    }

    SummaryBlock::from_lines(lines, idxs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(texts: &[&str]) -> Vec<Para> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Para::with_text(i, *t))
            .collect()
    }

    #[test]
    fn test_segment_simple_blocks() {
        let paras = stream(&[
            "Experienced engineer.",
            "Acme Corp",
            "• Built X",
            "• Shipped Y",
            "",
            "Globex",
            "• Led Z",
        ]);
        let blocks = segment_blocks(&paras);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].header, "Acme Corp");
        assert_eq!(blocks[0].bullets, vec!["Built X", "Shipped Y"]);
        assert_eq!(blocks[0].bullet_para_idxs, vec![2, 3]);
        assert_eq!(blocks[1].header, "Globex");
        assert_eq!(blocks[1].bullets, vec!["Led Z"]);
        assert_eq!(blocks[1].bullet_para_idxs, vec![6]);
    }

    #[test]
    fn test_segment_no_bullets_anywhere() {
        let paras = stream(&["Just", "plain", "text"]);
        assert!(segment_blocks(&paras).is_empty());
    }

    #[test]
    fn test_segment_bullets_before_any_header() {
        let paras = stream(&["• Orphan bullet", "• Second"]);
        let blocks = segment_blocks(&paras);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header, "");
        assert_eq!(blocks[0].bullets.len(), 2);
    }

    #[test]
    fn test_segment_nonbullet_closes_block() {
        let paras = stream(&["Acme", "• One", "Globex", "• Two"]);
        let blocks = segment_blocks(&paras);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].header, "Globex");
    }

    #[test]
    fn test_segment_detects_numbered_bullets_without_glyph() {
        let mut paras = stream(&["Acme", "Did the thing", "Did another"]);
        paras[1].numbered = true;
        paras[2].numbered = true;
        let blocks = segment_blocks(&paras);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].bullets, vec!["Did the thing", "Did another"]);
    }

    #[test]
    fn test_summary_skips_contact_lines() {
        let paras = stream(&[
            "jane@example.com | (555) 123-4567",
            "linkedin.com/in/jane",
            "Backend engineer with ten years of experience.",
            "Focused on reliability.",
            "• First bullet",
        ]);
        let summary = detect_summary(&paras, &ExtractOptions::default());
        assert_eq!(
            summary.text,
            "Backend engineer with ten years of experience. Focused on reliability."
        );
        assert_eq!(summary.para_idxs, vec![2, 3]);
    }

    #[test]
    fn test_summary_stops_at_bullet() {
        let paras = stream(&["An engineer.", "• bullet", "More text"]);
        let summary = detect_summary(&paras, &ExtractOptions::default());
        assert_eq!(summary.text, "An engineer.");
        assert_eq!(summary.para_idxs, vec![0]);
    }

    #[test]
    fn test_summary_excludes_allcaps_heading() {
        let paras = stream(&[
            "jane@example.com",
            "SUMMARY",
            "Engineer who ships.",
            "EXPERIENCE",
        ]);
        let summary = detect_summary(&paras, &ExtractOptions::default());
        assert_eq!(summary.text, "Engineer who ships.");
        assert_eq!(summary.para_idxs, vec![2]);
    }

    #[test]
    fn test_summary_capped_at_three_paragraphs() {
        let paras = stream(&["One.", "Two.", "Three.", "Four."]);
        let summary = detect_summary(&paras, &ExtractOptions::default());
        assert_eq!(summary.para_idxs.len(), 3);
        assert_eq!(summary.text, "One. Two. Three.");
    }

    #[test]
    fn test_summary_scan_window_bounded() {
        let mut texts: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        texts.insert(0, "jane@example.com".to_string());
        let paras: Vec<Para> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Para::with_text(i, t.clone()))
            .collect();

        let options = ExtractOptions::new().with_summary_scan_limit(5);
        let summary = detect_summary(&paras, &options);
        assert!(summary.para_idxs.iter().all(|&i| i < 5));
    }

    #[test]
    fn test_summary_empty_document() {
        let summary = detect_summary(&[], &ExtractOptions::default());
        assert!(summary.is_empty());
        assert!(summary.para_idxs.is_empty());
    }

    #[test]
    fn test_extract_model_combines() {
        let paras = stream(&[
            "Engineer with a decade of backend work.",
            "",
            "Acme Corp",
            "• Built X",
        ]);
        let model = extract_model(&paras, &ExtractOptions::default());
        assert_eq!(model.summary.text, "Engineer with a decade of backend work.");
        assert_eq!(model.block_count(), 1);
    }
}
