//! Document model types.
//!
//! The model is a plain-data snapshot of one loaded document: the leading
//! summary block plus the ordered experience blocks, each anchored to the
//! paragraph indices it was read from. Paragraph indices are only valid
//! against the same byte buffer the model was extracted from.

mod block;
mod document;
mod replacement;
mod tailor;

pub use block::{BulletBlock, SummaryBlock};
pub use document::DocumentModel;
pub use replacement::ReplacementSet;
pub use tailor::{BulletRewrite, TailorResponse, TailoredExperience};
