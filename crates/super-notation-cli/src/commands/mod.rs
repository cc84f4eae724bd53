pub mod info;
pub mod parse;
pub mod render;
pub mod sign;
pub mod unsign;
pub mod verify;

use std::path::Path;

use anyhow::Context;
use super_notation_config::Config;
use super_notation_engine::{Document, ParseMode, parse_bytes};

/// A `--strict` flag wins; otherwise the configured default applies.
pub fn mode(strict_flag: bool, config: &Config) -> ParseMode {
    if strict_flag || config.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    }
}

pub fn read(file: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("reading {}", file.display()))
}

pub fn write(file: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(file, bytes).with_context(|| format!("writing {}", file.display()))
}

pub fn load(file: &Path, mode: ParseMode) -> anyhow::Result<Document> {
    let bytes = read(file)?;
    parse_bytes(&bytes, mode).with_context(|| format!("parsing {}", file.display()))
}

/// Node variant name, e.g. `Paragraph`.
pub fn node_name(node: &super_notation_engine::ContentNode) -> &'static str {
    use super_notation_engine::ContentNode::*;
    match node {
        Section { .. } => "Section",
        SectionLink { .. } => "SectionLink",
        Paragraph { .. } => "Paragraph",
        HorizontalRule => "HorizontalRule",
        List { .. } => "List",
        CodeBlock { .. } => "CodeBlock",
        Image { .. } => "Image",
        Link { .. } => "Link",
        LinkWithText { .. } => "LinkWithText",
        CrossFileLink { .. } => "CrossFileLink",
        Literal { .. } => "Literal",
    }
}
