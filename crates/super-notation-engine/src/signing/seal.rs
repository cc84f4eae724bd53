//! The persisted signed layout.
//!
//! A signed file is its body, exactly as written, followed by
//! `\nsign: SHA256-<HEX>\nclose:\n`. The body keeps its own line endings and
//! byte-order mark; only the signature covers the canonical form.

use super::canonical::{self, CanonicalError};
use super::digest::{SignError, SignatureRecord};

const CR: u8 = b'\r';

/// The input up to its signature block, or all of it.
fn body(bytes: &[u8]) -> &[u8] {
    canonical::raw_signature_offset(bytes).map_or(bytes, |at| &bytes[..at])
}

/// Appends a signature block to `bytes`, replacing any existing one.
///
/// Sealing twice yields the same bytes.
pub fn seal(bytes: &[u8]) -> Result<Vec<u8>, SignError> {
    let record = SignatureRecord::compute(&canonical::canonicalize(bytes)?);
    let mut out = body(bytes).to_vec();
    if out.last() == Some(&CR) {
        // A trailing bare CR would pair with the next LF into one line ending.
        out.push(canonical::LF);
    }
    out.extend_from_slice(format!("\nsign: {record}\nclose:\n").as_bytes());
    Ok(out)
}

/// Strips the signature block. Returns `None` when there was none.
pub fn unseal(bytes: &[u8]) -> Result<Option<Vec<u8>>, CanonicalError> {
    canonical::normalize(bytes)?;
    Ok(canonical::raw_signature_offset(bytes).map(|at| bytes[..at].to_vec()))
}
