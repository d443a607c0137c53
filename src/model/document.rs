//! Top-level extraction result.

use super::{BulletBlock, SummaryBlock};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Structured snapshot of one parsed document.
///
/// Serializes to the flat shape external collaborators consume:
/// `{"summary": "...", "summary_para_idxs": [..], "experiences": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Leading narrative summary.
    #[serde(flatten)]
    pub summary: SummaryBlock,

    /// Ordered experience blocks.
    #[serde(default)]
    pub experiences: Vec<BulletBlock>,
}

impl DocumentModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of experience blocks.
    pub fn block_count(&self) -> usize {
        self.experiences.len()
    }

    /// Total number of bullets across all blocks.
    pub fn bullet_count(&self) -> usize {
        self.experiences.iter().map(|b| b.bullet_count()).sum()
    }

    /// Whether nothing was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.experiences.is_empty()
    }

    /// Serialize the model to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Deserialize a model from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
