//! Summary and experience block types.

use serde::{Deserialize, Serialize};

/// One experience (role) entry: a contiguous run of bullet paragraphs with
/// the non-bullet line that preceded them.
///
/// `bullets` and `bullet_para_idxs` are positionally 1:1; the segmentation
/// pass never emits a block without at least one bullet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletBlock {
    /// The non-bullet line immediately preceding the first bullet.
    /// Empty when bullets open the document.
    #[serde(default)]
    pub header: String,

    /// Company name, when an external enricher filled it in.
    #[serde(default)]
    pub company: Option<String>,

    /// Role title, when an external enricher filled it in.
    #[serde(default)]
    pub title: Option<String>,

    /// Start date, free-form.
    #[serde(default)]
    pub start: Option<String>,

    /// End date, free-form.
    #[serde(default)]
    pub end: Option<String>,

    /// Location, free-form.
    #[serde(default)]
    pub location: Option<String>,

    /// Visible bullet texts, glyph-stripped and whitespace-normalized.
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Paragraph index of each bullet in the source document.
    #[serde(default)]
    pub bullet_para_idxs: Vec<usize>,
}

impl BulletBlock {
    /// Create an empty block with the given header candidate.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Default::default()
        }
    }

    /// Append one bullet with its source paragraph index.
    pub fn push_bullet(&mut self, text: impl Into<String>, para_idx: usize) {
        self.bullets.push(text.into());
        self.bullet_para_idxs.push(para_idx);
    }

    /// Number of bullets in the block.
    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    /// Whether the stored paragraph anchors can be trusted: present and
    /// 1:1 with the bullet texts.
    pub fn has_anchors(&self) -> bool {
        !self.bullet_para_idxs.is_empty() && self.bullet_para_idxs.len() == self.bullets.len()
    }
}

/// The leading narrative text of the document.
///
/// Captured from at most a few consecutive paragraphs past the contact
/// header; `para_idxs` lists the paragraphs it was joined from, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBlock {
    /// Space-joined, whitespace-normalized summary text.
    #[serde(rename = "summary", default)]
    pub text: String,

    /// Paragraph indices composing the summary.
    #[serde(rename = "summary_para_idxs", default)]
    pub para_idxs: Vec<usize>,
}

impl SummaryBlock {
    /// Create a summary block from collected lines and their indices.
    pub fn from_lines(lines: Vec<String>, para_idxs: Vec<usize>) -> Self {
        Self {
            text: lines.join(" "),
            para_idxs,
        }
    }

    /// Whether no summary text was detected.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
