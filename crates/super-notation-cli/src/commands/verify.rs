use std::path::Path;

use super::read;

/// Prints the verification outcome. Returns whether the signature is valid.
pub fn run(file: &Path) -> anyhow::Result<bool> {
    let bytes = read(file)?;
    let verification = super_notation_engine::verify(&bytes);

    if verification.valid {
        println!("✓ {}", verification.detail);
    } else {
        eprintln!("✗ {}", verification.detail);
    }
    Ok(verification.valid)
}
