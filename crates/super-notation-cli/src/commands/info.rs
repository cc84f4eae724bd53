use std::path::{Path, PathBuf};

use relative_path::RelativePath;
use super_notation_engine::{ParseMode, Span, verify};

use super::{load, read};

/// Resolves a forward link against the directory of the linking file.
fn resolve_forward(file: &Path, link: &RelativePath) -> PathBuf {
    let base = file.parent().unwrap_or_else(|| Path::new(""));
    link.to_path(base)
}

pub fn run(file: &Path, mode: ParseMode, verbose: bool) -> anyhow::Result<()> {
    let doc = load(file, mode)?;
    let verification = verify(&read(file)?);

    println!("File: {}", file.display());
    if let Some(title) = doc.title() {
        println!("Title: {}", Span::plain_text(&title.spans));
    }
    println!("Metadata entries: {}", doc.metadata().len());
    println!("Content nodes: {}", doc.nodes().len());
    println!("Signed: {}", verification.has_signature());
    println!("Sealed: {}", doc.is_sealed());
    if verification.has_signature() {
        let verdict = if verification.valid { "✓ VALID" } else { "✗ INVALID" };
        println!("Signature: {verdict}");
    }

    if let Some(link) = doc.forward_link() {
        let target = resolve_forward(file, link);
        let state = if target.exists() { "exists" } else { "missing" };
        println!("Next: {link} ({state})");
    }

    if verbose && !doc.metadata().is_empty() {
        println!("\nMetadata:");
        for entry in doc.metadata() {
            println!("  {} = {}", entry.key, entry.value);
        }
    }
    Ok(())
}
