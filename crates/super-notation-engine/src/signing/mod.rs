//! Canonicalization, SHA-256 signatures and the sealed file layout.

pub mod canonical;
mod digest;
mod seal;

pub use canonical::{CanonicalError, canonicalize};
pub use digest::{
    DigestAlgorithm, SignError, SignatureRecord, Verification, VerifyDetail, VerifyError,
    extract_signature, sign, verify,
};
pub use seal::{seal, unseal};
