use std::path::Path;

use anyhow::Context;
use super_notation_engine::unseal;

use super::{read, write};

pub fn run(file: &Path) -> anyhow::Result<()> {
    let bytes = read(file)?;
    match unseal(&bytes).with_context(|| format!("reading {}", file.display()))? {
        Some(body) => {
            write(file, &body)?;
            println!("✓ Signature removed from: {}", file.display());
        }
        None => println!("ℹ No signature found in: {}", file.display()),
    }
    Ok(())
}
