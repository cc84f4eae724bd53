use std::path::Path;

use super_notation_engine::{ParseMode, verify};

use super::{load, node_name, read};

pub fn run(file: &Path, mode: ParseMode, json: bool, verbose: bool) -> anyhow::Result<()> {
    let doc = load(file, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("✓ Successfully parsed: {}", file.display());
    println!("  Metadata entries: {}", doc.metadata().len());
    println!("  Content nodes: {}", doc.nodes().len());
    println!("  Signed: {}", verify(&read(file)?).has_signature());
    println!("  Sealed: {}", doc.is_sealed());

    if verbose {
        println!("\n--- Document Structure ---");
        for (i, node) in doc.nodes().iter().enumerate() {
            println!("{}. {}", i + 1, node_name(node));
        }
    }
    Ok(())
}
