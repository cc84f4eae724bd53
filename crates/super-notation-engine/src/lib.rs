//! Super Notation (SN): a line-oriented markup format with signed, sealed
//! documents.
//!
//! ```
//! use super_notation_engine::{ParseMode, parse, render};
//!
//! let doc = parse("<super-notation-v1>\npara: Hi {b:there}\n", ParseMode::Strict).unwrap();
//! assert!(render(&doc).contains("<strong>there</strong>"));
//! ```

pub mod models;
pub mod parsing;
pub mod render;
pub mod signing;

// Re-export key types for easier usage
pub use models::{ContentNode, Document, ListStyle, MetaEntry, Title};
pub use parsing::inline::{Span, format_inline};
pub use parsing::{ParseError, ParseMode, parse, parse_bytes};
pub use render::{HtmlRenderer, RenderOptions, render};
pub use signing::{
    CanonicalError, SignError, SignatureRecord, Verification, VerifyDetail, VerifyError,
    canonicalize, seal, sign, unseal, verify,
};
