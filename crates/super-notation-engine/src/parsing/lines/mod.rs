//! # Line Classification
//!
//! Phase 1 of parsing. Each line of normalized text is tagged on its own as
//! blank, comment, declaration, command, or freeform text.
//!
//! - **`keywords`**: the fixed command vocabulary and the declaration token
//! - **`classify`**: `SnLineClassifier` and the `ClassifiedLine` it yields

pub mod classify;
pub mod keywords;

pub use classify::{ClassifiedLine, LineTag, SnLineClassifier, classify_lines};
pub use keywords::{DECLARATION, Keyword};
