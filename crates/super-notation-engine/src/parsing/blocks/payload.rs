//! Payload grammar of the individual body commands.
//!
//! Each helper takes the text after a command token and returns its parts,
//! or the reason the payload is malformed.

use std::sync::OnceLock;

use regex::Regex;

fn section_id_regex() -> &'static Regex {
    static SECTION_ID: OnceLock<Regex> = OnceLock::new();
    SECTION_ID.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid section id regex"))
}

/// Separator between a path or URL and its label.
pub const PIPE: char = '|';
/// Separator between an id or location and its visible text.
pub const LABEL: char = ':';

pub fn section_id(text: &str) -> Result<&str, String> {
    let id = text.trim();
    if id.is_empty() {
        return Err("missing section id".to_string());
    }
    if !section_id_regex().is_match(id) {
        return Err(format!(
            "section id `{id}` may only contain letters, digits, `-` and `_`"
        ));
    }
    Ok(id)
}

/// `<id>: <text>` after `sec=`.
pub fn section_link(rest: &str) -> Result<(&str, &str), String> {
    let (id, text) = rest
        .split_once(LABEL)
        .ok_or_else(|| "expected `sec=<id>: <text>`".to_string())?;
    Ok((section_id(id)?, text.trim()))
}

/// `<location>: <text>` after `opensn=`.
pub fn cross_file(rest: &str) -> Result<(&str, &str), String> {
    let (location, text) = rest
        .split_once(LABEL)
        .ok_or_else(|| "expected `opensn=<location>: <text>`".to_string())?;
    let location = location.trim();
    if location.is_empty() {
        return Err("missing location".to_string());
    }
    Ok((location, text.trim()))
}

/// `<path> | <alt>` after `img:=`.
pub fn image(rest: &str) -> Result<(&str, &str), String> {
    let (path, alt) = rest
        .split_once(PIPE)
        .ok_or_else(|| "missing `|` between image path and alt text".to_string())?;
    let path = path.trim();
    if path.is_empty() {
        return Err("missing image path".to_string());
    }
    Ok((path, alt.trim()))
}

/// `<text> | <url>` after `linktxt:`.
pub fn link_text(rest: &str) -> Result<(&str, &str), String> {
    let (text, url) = rest
        .split_once(PIPE)
        .ok_or_else(|| "missing `|` between link text and URL".to_string())?;
    let url = url.trim();
    if url.is_empty() {
        return Err("missing URL".to_string());
    }
    Ok((text.trim(), url))
}

/// Best-effort reading of a `linktxt:` payload without a `|`.
///
/// Splits on the first `:`; failing that, the whole text is both the label
/// and the URL.
pub fn link_text_fallback(rest: &str) -> (&str, &str) {
    match rest.split_once(LABEL) {
        Some((text, url)) => (text.trim(), url.trim()),
        None => (rest.trim(), rest.trim()),
    }
}

/// A non-empty single value such as a URL or a path.
pub fn required(rest: &str, what: &str) -> Result<String, String> {
    let value = rest.trim();
    if value.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(value.to_string())
    }
}
