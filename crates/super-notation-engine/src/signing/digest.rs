use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::canonical::{self, CanonicalError, Lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DigestAlgorithm {
    #[serde(rename = "SHA256")]
    Sha256,
}

impl DigestAlgorithm {
    pub const fn tag(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA256",
        }
    }
}

/// A signature as written on a `sign:` line: `SHA256-<HEX>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SignatureRecord {
    pub algorithm: DigestAlgorithm,
    pub digest: String,
}

impl SignatureRecord {
    /// Digest of already canonical bytes.
    pub fn compute(canonical: &[u8]) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256,
            digest: hex::encode_upper(Sha256::digest(canonical)),
        }
    }

    /// Parses `SHA256-<HEX>`. Hex case is preserved so that a lowercase
    /// digest can still be reported and then fail the comparison.
    pub fn parse(value: &str) -> Option<Self> {
        let (tag, digest) = value.trim().split_once('-')?;
        if tag != DigestAlgorithm::Sha256.tag() {
            return None;
        }
        if digest.is_empty() || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            algorithm: DigestAlgorithm::Sha256,
            digest: digest.to_string(),
        })
    }
}

impl fmt::Display for SignatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm.tag(), self.digest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("no signature found")]
    NoSignature,

    #[error("signature mismatch: expected {expected}, found {found}")]
    SignatureMismatch { expected: String, found: String },

    #[error("input is not valid UTF-8 (byte offset {offset})")]
    InvalidEncoding { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyDetail {
    NoSignature,
    Mismatch { expected: String, found: String },
    Valid { digest: String, sealed: bool },
    InvalidEncoding { offset: usize },
}

impl fmt::Display for VerifyDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyDetail::NoSignature => write!(f, "No signature found"),
            VerifyDetail::Mismatch { expected, found } => {
                write!(f, "Signature mismatch: expected {expected}, found {found}")
            }
            VerifyDetail::Valid { digest, sealed: true } => {
                write!(f, "Signature valid and document is sealed: {digest}")
            }
            VerifyDetail::Valid {
                digest,
                sealed: false,
            } => write!(f, "Signature valid (not sealed): {digest}"),
            VerifyDetail::InvalidEncoding { offset } => {
                write!(f, "Invalid UTF-8 at byte offset {offset}")
            }
        }
    }
}

/// Outcome of [`verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub valid: bool,
    pub detail: VerifyDetail,
}

impl Verification {
    fn invalid(detail: VerifyDetail) -> Self {
        Self {
            valid: false,
            detail,
        }
    }

    /// Whether the input has a `sign:` line at all, well formed or not.
    pub fn has_signature(&self) -> bool {
        matches!(
            self.detail,
            VerifyDetail::Valid { .. } | VerifyDetail::Mismatch { .. }
        )
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self.detail, VerifyDetail::Valid { sealed: true, .. })
    }

    /// The verified signature, or the reason there is none.
    pub fn into_result(self) -> Result<String, VerifyError> {
        match self.detail {
            VerifyDetail::Valid { digest, .. } => Ok(digest),
            VerifyDetail::NoSignature => Err(VerifyError::NoSignature),
            VerifyDetail::Mismatch { expected, found } => {
                Err(VerifyError::SignatureMismatch { expected, found })
            }
            VerifyDetail::InvalidEncoding { offset } => Err(VerifyError::InvalidEncoding { offset }),
        }
    }
}

/// `SHA256-<HEX>` over the canonical bytes of `bytes`.
pub fn sign(bytes: &[u8]) -> Result<String, SignError> {
    let canonical = canonical::canonicalize(bytes)?;
    Ok(SignatureRecord::compute(&canonical).to_string())
}

/// Text after `sign:` on a signature line, trimmed.
fn signature_value(line: &[u8]) -> String {
    let rest = &canonical::strip_leading_space(line)[canonical::SIGN_PREFIX.len()..];
    String::from_utf8_lossy(rest).trim().to_string()
}

/// Checks the first `sign:` line against a freshly computed digest.
///
/// Never fails; every outcome is described by the returned [`Verification`].
pub fn verify(bytes: &[u8]) -> Verification {
    let doc = match Lines::new(bytes) {
        Ok(doc) => doc,
        Err(CanonicalError::InvalidEncoding { offset }) => {
            return Verification::invalid(VerifyDetail::InvalidEncoding { offset });
        }
    };
    let lines = doc.split();
    let Some(at) = canonical::signature_line_index(&lines) else {
        return Verification::invalid(VerifyDetail::NoSignature);
    };

    let expected = SignatureRecord::compute(&doc.canonical(&lines, Some(at))).to_string();
    let found = signature_value(lines[at]);
    if found != expected {
        log::debug!("signature mismatch at line {}", at + 1);
        return Verification::invalid(VerifyDetail::Mismatch { expected, found });
    }

    let sealed = lines[at + 1..].iter().any(|l| canonical::is_seal_marker(l));
    Verification {
        valid: true,
        detail: VerifyDetail::Valid {
            digest: expected,
            sealed,
        },
    }
}

/// The signature written on the first `sign:` line, if it is well formed.
pub fn extract_signature(bytes: &[u8]) -> Option<SignatureRecord> {
    let doc = Lines::new(bytes).ok()?;
    let lines = doc.split();
    let at = canonical::signature_line_index(&lines)?;
    SignatureRecord::parse(&signature_value(lines[at]))
}
