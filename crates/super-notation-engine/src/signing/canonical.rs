//! Byte-exact canonicalization of SN files.
//!
//! The canonical bytes are what a signature covers. Every implementation
//! must produce the same bytes for the same input, so the steps below are
//! fixed and applied in order:
//!
//! 1. validate UTF-8
//! 2. strip one leading UTF-8 byte-order mark
//! 3. turn CRLF and bare CR into LF
//! 4. split on LF
//! 5. find the first line that, after leading whitespace and ASCII case
//!    folding, starts with `sign:`
//! 6. keep the lines before it joined with LF (no trailing LF added), or
//!    everything when there is no such line
//!
//! Nothing else is touched: no trimming, no whitespace collapsing.

use std::borrow::Cow;

pub const BOM: &[u8] = b"\xEF\xBB\xBF";
pub const LF: u8 = b'\n';
const CR: u8 = b'\r';
/// Prefix of a signature line, compared after ASCII lowercasing.
pub const SIGN_PREFIX: &[u8] = b"sign:";
/// The seal marker, compared after trimming and ASCII lowercasing.
pub const SEAL_MARKER: &[u8] = b"close:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonicalError {
    #[error("input is not valid UTF-8 (byte offset {offset})")]
    InvalidEncoding { offset: usize },
}

/// Steps 1–3: validated, BOM-free, LF-only bytes.
pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>, CanonicalError> {
    std::str::from_utf8(bytes).map_err(|e| CanonicalError::InvalidEncoding {
        offset: e.valid_up_to(),
    })?;
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);

    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        if b == CR {
            iter.next_if_eq(&LF);
            out.push(LF);
        } else {
            out.push(b);
        }
    }
    Ok(out)
}

/// Text counterpart of [`normalize`] for already-decoded input.
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Leading whitespace as stripped before looking for `sign:`.
fn is_leading_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

pub(crate) fn strip_leading_space(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|&b| !is_leading_space(b))
        .unwrap_or(line.len());
    &line[start..]
}

/// Whether a line marks the start of the signature block.
pub fn is_signature_line(line: &[u8]) -> bool {
    strip_leading_space(line)
        .get(..SIGN_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SIGN_PREFIX))
}

/// Whether a line is the `close:` seal marker.
pub fn is_seal_marker(line: &[u8]) -> bool {
    line.trim_ascii().eq_ignore_ascii_case(SEAL_MARKER)
}

/// Normalized input split into lines, with the signature line located.
pub(crate) struct Lines {
    normalized: Vec<u8>,
}

impl Lines {
    pub(crate) fn new(bytes: &[u8]) -> Result<Self, CanonicalError> {
        Ok(Self {
            normalized: normalize(bytes)?,
        })
    }

    pub(crate) fn split(&self) -> Vec<&[u8]> {
        self.normalized.split(|&b| b == LF).collect()
    }

    /// Canonical bytes given the split lines.
    pub(crate) fn canonical(&self, lines: &[&[u8]], signature_at: Option<usize>) -> Vec<u8> {
        match signature_at {
            Some(idx) => lines[..idx].join(&LF),
            None => self.normalized.clone(),
        }
    }
}

pub(crate) fn signature_line_index(lines: &[&[u8]]) -> Option<usize> {
    lines.iter().position(|l| is_signature_line(l))
}

/// Byte offset in raw, unnormalized input where the signature block starts:
/// the start of the line terminator before the first `sign:` line, or the
/// start of that line when it is the first one. `None` without a signature
/// line.
///
/// Everything before the offset has the same canonical bytes as the whole
/// input, with its original line endings and byte-order mark intact.
pub(crate) fn raw_signature_offset(bytes: &[u8]) -> Option<usize> {
    let mut start = if bytes.starts_with(BOM) { BOM.len() } else { 0 };
    let mut cut = start;
    loop {
        let end = bytes[start..]
            .iter()
            .position(|&b| b == LF || b == CR)
            .map_or(bytes.len(), |p| start + p);
        if is_signature_line(&bytes[start..end]) {
            return Some(cut);
        }
        if end == bytes.len() {
            return None;
        }
        cut = end;
        start = if bytes[end] == CR && bytes.get(end + 1) == Some(&LF) {
            end + 2
        } else {
            end + 1
        };
    }
}

/// 1-based line number of a byte offset, counting CRLF, CR and LF endings.
pub fn line_of_offset(bytes: &[u8], offset: usize) -> usize {
    let breaks = bytes[..offset.min(bytes.len())]
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == LF || (b == CR && bytes.get(i + 1) != Some(&LF)))
        .count();
    breaks + 1
}

/// Canonical bytes of a raw SN file.
pub fn canonicalize(bytes: &[u8]) -> Result<Vec<u8>, CanonicalError> {
    let doc = Lines::new(bytes)?;
    let lines = doc.split();
    let at = signature_line_index(&lines);
    Ok(doc.canonical(&lines, at))
}
