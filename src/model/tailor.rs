//! Adapter for the AI tailoring service's response shape.
//!
//! The tailoring collaborator receives the extracted summary and bullets and
//! returns rewrites keyed by experience index and source bullet index. The
//! core trusts the shape but not the counts; count mismatches are reconciled
//! later by the rewrite pass.

use super::ReplacementSet;
use serde::{Deserialize, Serialize};

/// One rewritten bullet, keyed by its index within the source block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletRewrite {
    /// Index of the bullet in the original block.
    pub source_index: usize,

    /// Rewritten bullet text.
    pub rewritten: String,
}

/// Rewrites for one experience block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredExperience {
    /// Index of the block in the extracted model.
    pub exp_index: usize,

    /// Rewritten bullets, in any order.
    #[serde(default)]
    pub rewrites: Vec<BulletRewrite>,
}

/// Full response from the tailoring service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TailorResponse {
    /// Rewritten summary text.
    #[serde(default)]
    pub summary: String,

    /// Per-block rewrites.
    #[serde(default)]
    pub experiences: Vec<TailoredExperience>,
}

impl TailorResponse {
    /// Parse a response from JSON.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<TailorResponse> for ReplacementSet {
    /// Flatten the keyed response into positional replacement lists.
    ///
    /// Rewrites are ordered by `source_index`; duplicate indices keep the
    /// first occurrence and gaps simply shorten the list (the rewrite pass
    /// pads from the original texts).
    fn from(response: TailorResponse) -> Self {
        let mut set = ReplacementSet::new();

        let summary = response.summary.trim();
        if !summary.is_empty() {
            set.summary = Some(summary.to_string());
        }

        for exp in response.experiences {
            let mut rewrites = exp.rewrites;
            rewrites.sort_by_key(|r| r.source_index);
            rewrites.dedup_by_key(|r| r.source_index);

            let bullets: Vec<String> = rewrites
                .into_iter()
                .map(|r| r.rewritten)
                .filter(|t| !t.trim().is_empty())
                .collect();
            if !bullets.is_empty() {
                set.bullets.insert(exp.exp_index, bullets);
            }
        }

        set
    }
}
