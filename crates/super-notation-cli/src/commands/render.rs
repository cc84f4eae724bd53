use std::path::{Path, PathBuf};

use anyhow::Context;
use super_notation_config::Config;
use super_notation_engine::{HtmlRenderer, ParseMode, RenderOptions};

use super::{load, write};

/// Where HTML for `file` goes when no `-o` is given.
fn default_output(file: &Path, config: &Config) -> PathBuf {
    let html = file.with_extension("html");
    match (&config.output_dir, html.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => html,
    }
}

pub fn run(
    file: &Path,
    output: Option<&Path>,
    mode: ParseMode,
    fragment: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let doc = load(file, mode)?;

    let options = RenderOptions::new()
        .with_standalone(config.render.standalone && !fragment)
        .with_stylesheet(config.render.stylesheet);
    let html = HtmlRenderer::new(options).render(&doc);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(file, config));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    write(&output, html.as_bytes())?;

    println!("✓ Rendered to: {}", output.display());
    Ok(())
}
