//! Target paragraph resolution.
//!
//! Two strategies behind one seam: trust the paragraph indices stored at
//! extraction time, or relocate bullets by matching their original text
//! against a freshly scanned paragraph stream. The second fires when a block
//! came from a degraded extraction and carries no usable anchors.

use std::collections::{HashMap, HashSet};

use crate::extract::classify::is_bullet_paragraph;
use crate::model::BulletBlock;
use crate::package::Para;

/// Minimum token-overlap ratio for a fuzzy relocation to be accepted.
///
/// Below this the candidate is left untouched: a silently skipped edit is
/// recoverable, a rewritten unrelated paragraph is not. The value is a
/// long-standing tuning constant; callers can override it per rewrite via
/// [`RewriteOptions`](super::RewriteOptions).
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.70;

/// Resolve a block's target paragraph indices from its stored anchors.
///
/// Returns `None` when anchors are missing or out of range, signalling the
/// caller to fall back to text relocation.
pub fn locate_by_index(block: &BulletBlock, para_count: usize) -> Option<Vec<usize>> {
    if !block.has_anchors() {
        return None;
    }
    if block.bullet_para_idxs.iter().any(|&i| i >= para_count) {
        return None;
    }
    let mut idxs = block.bullet_para_idxs.clone();
    idxs.sort_unstable();
    Some(idxs)
}

/// Relocate bullets by matching their original text against the paragraph
/// stream.
///
/// Exact pass first: normalized text equality against any unused paragraph.
/// Bullets still unmatched go through a fuzzy pass restricted to bullet-like
/// paragraphs, accepting the best unused candidate only at or above
/// `threshold` token overlap. Returns the matched indices sorted ascending;
/// unmatched bullets are simply absent.
pub fn locate_by_text(paras: &[Para], original_bullets: &[String], threshold: f64) -> Vec<usize> {
    let mut norm_to_idxs: HashMap<String, Vec<usize>> = HashMap::new();
    for para in paras {
        let t = normalize(&para.text);
        if !t.is_empty() {
            norm_to_idxs.entry(t).or_default().push(para.index);
        }
    }

    let mut target: Vec<usize> = Vec::new();
    let mut used: HashSet<usize> = HashSet::new();

    // Pass 1: exact normalized matches.
    let mut unmatched: Vec<&String> = Vec::new();
    for bullet in original_bullets {
        let nb = normalize(bullet);
        let found = norm_to_idxs
            .get(&nb)
            .and_then(|idxs| idxs.iter().find(|i| !used.contains(i)).copied());
        match found {
            Some(idx) => {
                target.push(idx);
                used.insert(idx);
            }
            None => unmatched.push(bullet),
        }
    }

    // Pass 2: token overlap among bullet-like paragraphs only, to reduce
    // false hits.
    if !unmatched.is_empty() {
        let candidates: Vec<(usize, HashSet<String>)> = paras
            .iter()
            .filter(|p| is_bullet_paragraph(p))
            .map(|p| (p.index, tokenize(&p.text)))
            .collect();

        for bullet in unmatched {
            let btoks = tokenize(bullet);
            if btoks.is_empty() {
                continue;
            }
            let mut best: Option<usize> = None;
            let mut best_score = 0.0f64;
            for (idx, ptoks) in &candidates {
                if used.contains(idx) || ptoks.is_empty() {
                    continue;
                }
                let overlap = btoks.intersection(ptoks).count() as f64 / btoks.len() as f64;
                if overlap > best_score {
                    best_score = overlap;
                    best = Some(*idx);
                }
            }
            if let Some(idx) = best {
                if best_score >= threshold {
                    target.push(idx);
                    used.insert(idx);
                } else {
                    log::debug!(
                        "fuzzy relocation rejected for bullet (best overlap {:.2} < {:.2})",
                        best_score,
                        threshold
                    );
                }
            }
        }
    }

    target.sort_unstable();
    target
}

/// Lowercase and collapse whitespace.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercased tokens, stripped to alphanumerics plus `+ # / . -`.
fn tokenize(s: &str) -> HashSet<String> {
    let mut tokens = HashSet::new();
    let mut current = String::new();
    for c in s.to_lowercase().chars() {
        if c.is_alphanumeric() || matches!(c, '+' | '#' | '/' | '.' | '-') {
            current.push(c);
        } else if !current.is_empty() {
            tokens.insert(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.insert(current);
    }
    tokens
}
