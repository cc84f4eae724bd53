//! # Parsing
//!
//! Text → [`Document`] in two phases:
//!
//! 1. **`lines`**: every line is classified on its own
//! 2. **`blocks`**: a state machine walks the classified lines and builds the
//!    document, calling **`inline`** on every text payload
//!
//! The parse mode is an explicit value; nothing is configured globally.

pub mod blocks;
pub mod error;
pub mod inline;
pub mod lines;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::models::Document;
use crate::signing::{self, canonical};

use blocks::BlockParser;
use lines::classify_lines;

pub use error::ParseError;

/// How the parser treats input it cannot interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unrecognized lines become `Literal` nodes; inline groups close best-effort.
    #[default]
    Lenient,
    /// The first unrecognized or malformed line is a fatal error.
    Strict,
}

/// Parses SN text into a [`Document`].
///
/// Line endings are normalized and a leading byte-order mark is ignored. The
/// returned document carries no signature state; see [`parse_bytes`].
pub fn parse(text: &str, mode: ParseMode) -> Result<Document, ParseError> {
    let text = canonical::normalize_text(text);
    let lines = classify_lines(&text);
    BlockParser::new(&lines, mode).run()
}

/// Decodes and parses raw file bytes, attaching the signature state
/// verified against the same bytes.
pub fn parse_bytes(bytes: &[u8], mode: ParseMode) -> Result<Document, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let offset = e.valid_up_to();
        ParseError::InvalidEncoding {
            line: canonical::line_of_offset(bytes, offset),
            offset,
        }
    })?;
    let doc = parse(text, mode)?;

    let verification = signing::verify(bytes);
    let record = signing::extract_signature(bytes);
    Ok(doc.with_signature(record, verification.is_sealed()))
}
