//! Caller-supplied replacement text for a rewrite pass.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replacement text for one rewrite request.
///
/// Constructed per request and discarded after use. Block indices refer to
/// positions in the [`DocumentModel::experiences`](super::DocumentModel)
/// list the rewrite runs against; blocks without an entry are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplacementSet {
    /// New summary text, if the summary should be rewritten.
    #[serde(default)]
    pub summary: Option<String>,

    /// New bullet texts keyed by experience block index.
    #[serde(default)]
    pub bullets: HashMap<usize, Vec<String>>,
}

impl ReplacementSet {
    /// Create an empty replacement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement summary text.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the replacement bullets for one block.
    pub fn with_block(mut self, block_idx: usize, bullets: Vec<String>) -> Self {
        self.bullets.insert(block_idx, bullets);
        self
    }

    /// Whether the set contains nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.summary
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
            && self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let set = ReplacementSet::new()
            .with_summary("New summary.")
            .with_block(0, vec!["a".into(), "b".into()])
            .with_block(2, vec!["c".into()]);

        assert_eq!(set.summary.as_deref(), Some("New summary."));
        assert_eq!(set.bullets.len(), 2);
        assert_eq!(set.bullets[&2], vec!["c".to_string()]);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_blank_summary_counts_as_empty() {
        let set = ReplacementSet::new().with_summary("   ");
        assert!(set.is_empty());
    }
}
