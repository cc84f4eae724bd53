use std::path::Path;

use anyhow::Context;
use super_notation_engine::{seal, verify};

use super::{read, write};

pub fn run(file: &Path) -> anyhow::Result<()> {
    let bytes = read(file)?;
    let sealed = seal(&bytes).with_context(|| format!("signing {}", file.display()))?;
    let signature = verify(&sealed)
        .into_result()
        .context("freshly sealed file failed verification")?;
    write(file, &sealed)?;

    log::debug!("sealed {} ({} bytes)", file.display(), sealed.len());
    println!("✓ File signed: {}", file.display());
    println!("  Signature: {signature}");
    Ok(())
}
