//! Structure-preserving rewriting.
//!
//! Re-opens the original document bytes, resolves which paragraphs each
//! replacement belongs to, reconciles bullet counts against the template,
//! and emits a new package with only the targeted text changed. The
//! extraction-side model is never mutated; the two passes share nothing but
//! plain data.

pub mod locate;
pub mod splitter;

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{BulletBlock, DocumentModel, ReplacementSet};
use crate::package::{scan_paragraphs, scan_styles, DocxPackage, Para};

pub use locate::DEFAULT_FUZZY_THRESHOLD;

/// Options for the rewrite pass.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Acceptance threshold for fuzzy bullet relocation.
    pub fuzzy_threshold: f64,
}

impl RewriteOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the fuzzy relocation threshold.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// Rewrite bullet paragraphs in place, keeping the template shape.
///
/// Blocks without an entry in `replacements` are untouched. Works even when
/// a block carries no paragraph anchors by relocating its original bullet
/// texts. The replacement list is reconciled to the template's bullet count
/// per block: padded from the original texts or truncated.
pub fn rewrite_bullets(
    document_bytes: &[u8],
    blocks: &[BulletBlock],
    replacements: &HashMap<usize, Vec<String>>,
    options: &RewriteOptions,
) -> Result<Vec<u8>> {
    let package = DocxPackage::open(document_bytes)?;
    let styles = package
        .styles_xml()
        .map(scan_styles)
        .unwrap_or_default();
    let paras = scan_paragraphs(package.document_xml(), &styles)?;

    let edits = plan_bullet_edits(&paras, blocks, replacements, options);
    if edits.is_empty() {
        return Ok(document_bytes.to_vec());
    }

    apply_edits(&package, &edits)
}

/// Rewrite the summary paragraphs with redistributed text.
///
/// No-op when there are no summary paragraphs or the new text is blank.
pub fn rewrite_summary(
    document_bytes: &[u8],
    summary_para_idxs: &[usize],
    new_summary: &str,
) -> Result<Vec<u8>> {
    if summary_para_idxs.is_empty() || new_summary.trim().is_empty() {
        return Ok(document_bytes.to_vec());
    }

    let package = DocxPackage::open(document_bytes)?;
    let paras = scan_paragraphs(package.document_xml(), &HashMap::new())?;

    let edits = plan_summary_edits(&paras, summary_para_idxs, new_summary);
    if edits.is_empty() {
        return Ok(document_bytes.to_vec());
    }

    apply_edits(&package, &edits)
}

/// Apply a full replacement set (bullets and summary) in one pass.
pub fn rewrite(
    document_bytes: &[u8],
    model: &DocumentModel,
    replacements: &ReplacementSet,
    options: &RewriteOptions,
) -> Result<Vec<u8>> {
    if replacements.is_empty() {
        return Ok(document_bytes.to_vec());
    }

    let package = DocxPackage::open(document_bytes)?;
    let styles = package
        .styles_xml()
        .map(scan_styles)
        .unwrap_or_default();
    let paras = scan_paragraphs(package.document_xml(), &styles)?;

    let mut edits = plan_bullet_edits(&paras, &model.experiences, &replacements.bullets, options);

    if let Some(summary) = replacements.summary.as_deref() {
        // Summary edits win over any overlapping bullet edit; overlap would
        // mean the extraction misclassified a paragraph anyway.
        edits.extend(plan_summary_edits(&paras, &model.summary.para_idxs, summary));
    }

    if edits.is_empty() {
        return Ok(document_bytes.to_vec());
    }
    apply_edits(&package, &edits)
}

fn apply_edits(package: &DocxPackage, edits: &HashMap<usize, String>) -> Result<Vec<u8>> {
    let new_document =
        crate::package::rewrite_paragraph_texts(package.document_xml(), edits)?;
    package.save_with_document(&new_document)
}

/// Resolve targets and reconcile counts for every replaced block.
fn plan_bullet_edits(
    paras: &[Para],
    blocks: &[BulletBlock],
    replacements: &HashMap<usize, Vec<String>>,
    options: &RewriteOptions,
) -> HashMap<usize, String> {
    // (block index, ascending target paragraph indices)
    let mut work: Vec<(usize, Vec<usize>)> = Vec::new();

    for (block_idx, block) in blocks.iter().enumerate() {
        if !replacements.contains_key(&block_idx) {
            continue;
        }

        let targets = match locate::locate_by_index(block, paras.len()) {
            Some(idxs) => idxs,
            None => {
                let originals: Vec<String> = block
                    .bullets
                    .iter()
                    .map(|b| b.trim().to_string())
                    .filter(|b| !b.is_empty())
                    .collect();
                if originals.is_empty() {
                    continue;
                }
                log::debug!(
                    "block {} has no usable anchors; relocating {} bullets by text",
                    block_idx,
                    originals.len()
                );
                locate::locate_by_text(paras, &originals, options.fuzzy_threshold)
            }
        };

        if !targets.is_empty() {
            work.push((block_idx, targets));
        }
    }

    // Bottom of the document first. Indices cannot shift today (text is
    // replaced in place, paragraphs are never inserted or removed), but any
    // future insertion would invalidate lower indices computed earlier.
    work.sort_by_key(|(_, targets)| std::cmp::Reverse(*targets.last().unwrap_or(&0)));

    let mut edits: HashMap<usize, String> = HashMap::new();
    for (block_idx, targets) in work {
        let mut new_bullets: Vec<String> = replacements
            .get(&block_idx)
            .map(|list| {
                list.iter()
                    .map(|b| b.trim().to_string())
                    .filter(|b| !b.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if new_bullets.is_empty() {
            continue;
        }

        // Reconcile to the template's bullet count: the block keeps its
        // shape no matter what came back from the rewriter.
        let original_texts: Vec<String> = targets
            .iter()
            .map(|&i| paras.get(i).map(|p| p.text.trim().to_string()).unwrap_or_default())
            .collect();
        if new_bullets.len() < original_texts.len() {
            log::debug!(
                "block {}: padding {} replacement bullets to {}",
                block_idx,
                new_bullets.len(),
                original_texts.len()
            );
            new_bullets.extend(original_texts[new_bullets.len()..].iter().cloned());
        } else if new_bullets.len() > original_texts.len() {
            log::debug!(
                "block {}: truncating {} replacement bullets to {}",
                block_idx,
                new_bullets.len(),
                original_texts.len()
            );
            new_bullets.truncate(original_texts.len());
        }

        for (idx, text) in targets.into_iter().zip(new_bullets) {
            edits.insert(idx, text);
        }
    }

    edits
}

/// Distribute the new summary across its paragraphs.
fn plan_summary_edits(
    paras: &[Para],
    summary_para_idxs: &[usize],
    new_summary: &str,
) -> HashMap<usize, String> {
    let idxs: Vec<usize> = summary_para_idxs
        .iter()
        .copied()
        .filter(|&i| i < paras.len())
        .collect();
    if idxs.is_empty() || new_summary.trim().is_empty() {
        return HashMap::new();
    }

    let chunks = splitter::distribute(new_summary, idxs.len());
    idxs.into_iter().zip(chunks).collect()
}
