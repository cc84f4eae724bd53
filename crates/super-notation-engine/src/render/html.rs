use std::collections::HashSet;

use html_escape::encode_quoted_attribute as escape;

use crate::models::{ContentNode, Document, ListStyle};
use crate::parsing::inline::Span;

use super::{DEFAULT_CSS, RenderOptions};

const UNTITLED: &str = "Untitled Document";

/// Renders a document as a standalone HTML page with the default stylesheet.
pub fn render(doc: &Document) -> String {
    HtmlRenderer::new(RenderOptions::default()).render(doc)
}

/// Renders inline spans to escaped HTML.
pub fn render_spans(spans: &[Span]) -> String {
    enum Step<'a> {
        Span(&'a Span),
        Close(&'static str),
    }

    let mut out = String::new();
    let mut stack: Vec<Step<'_>> = spans.iter().rev().map(Step::Span).collect();
    while let Some(step) = stack.pop() {
        let (open, close, children) = match step {
            Step::Close(tag) => {
                out.push_str(tag);
                continue;
            }
            Step::Span(Span::Text(text)) => {
                out.push_str(&escape(text));
                continue;
            }
            Step::Span(Span::Bold(c)) => ("<strong>".to_string(), "</strong>", c),
            Step::Span(Span::Italic(c)) => ("<em>".to_string(), "</em>", c),
            Step::Span(Span::Underline(c)) => ("<u>".to_string(), "</u>", c),
            Step::Span(Span::Color { value, children }) => (
                format!("<span style=\"color: {}\">", escape(value)),
                "</span>",
                children,
            ),
        };
        out.push_str(&open);
        stack.push(Step::Close(close));
        stack.extend(children.iter().rev().map(Step::Span));
    }
    out
}

/// HTML renderer.
///
/// Output is one element per line. No validation happens here: whatever the
/// parser accepted is rendered.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut out = Vec::new();
        if self.options.standalone {
            self.push_head(&mut out, doc);
        }

        out.push(r#"<div class="sn-document">"#.to_string());
        Self::push_body(&mut out, doc);
        out.push("</div>".to_string());

        if self.options.standalone {
            out.push("</body>".to_string());
            out.push("</html>".to_string());
        }
        out.join("\n")
    }

    fn push_head(&self, out: &mut Vec<String>, doc: &Document) {
        let title = doc
            .title()
            .map(|t| Span::plain_text(&t.spans))
            .unwrap_or_else(|| UNTITLED.to_string());

        out.push("<!DOCTYPE html>".to_string());
        out.push(r#"<html lang="en">"#.to_string());
        out.push("<head>".to_string());
        out.push(r#"    <meta charset="UTF-8">"#.to_string());
        out.push(
            r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0">"#
                .to_string(),
        );
        out.push(format!("    <title>{}</title>", escape(&title)));
        if self.options.stylesheet {
            out.push("    <style>".to_string());
            out.push(DEFAULT_CSS.to_string());
            out.push("    </style>".to_string());
        }
        out.push("</head>".to_string());
        out.push("<body>".to_string());
    }

    fn push_body(out: &mut Vec<String>, doc: &Document) {
        if let Some(title) = doc.title() {
            out.push(format!(
                r#"<h1 class="sn-title">{}</h1>"#,
                render_spans(&title.spans)
            ));
        }

        let mut anchored = HashSet::new();
        for node in doc.nodes() {
            Self::push_node(out, node, &mut anchored);
        }

        if let Some(next) = doc.forward_link() {
            let next = escape(next.as_str());
            out.push(format!(
                r#"<div class="sn-next"><a href="{next}">Next: {next} →</a></div>"#
            ));
        }
        if doc.is_sealed() {
            out.push(r#"<div class="sn-seal">🔒 Document sealed and signed</div>"#.to_string());
        }
    }

    fn push_node<'d>(out: &mut Vec<String>, node: &'d ContentNode, anchored: &mut HashSet<&'d str>) {
        match node {
            ContentNode::Section { id } => {
                let escaped = escape(id);
                if anchored.insert(id.as_str()) {
                    out.push(format!(
                        r#"<h2 id="{escaped}" class="sn-section">{escaped}</h2>"#
                    ));
                } else {
                    out.push(format!(r#"<h2 class="sn-section">{escaped}</h2>"#));
                }
            }
            ContentNode::SectionLink { target, text } => out.push(format!(
                r##"<p><a href="#{}">{}</a></p>"##,
                escape(target),
                render_spans(text)
            )),
            ContentNode::Paragraph { spans } => {
                out.push(format!(r#"<p class="sn-para">{}</p>"#, render_spans(spans)))
            }
            ContentNode::HorizontalRule => out.push(r#"<hr class="sn-break">"#.to_string()),
            ContentNode::List { style, items } => {
                let tag = match style {
                    ListStyle::Bullet => "ul",
                    ListStyle::Numbers => "ol",
                };
                out.push(format!(r#"<{tag} class="sn-list">"#));
                for item in items {
                    out.push(format!("    <li>{}</li>", render_spans(item)));
                }
                out.push(format!("</{tag}>"));
            }
            ContentNode::CodeBlock { raw } => out.push(format!(
                r#"<pre class="sn-code"><code>{}</code></pre>"#,
                escape(raw)
            )),
            ContentNode::Image { path, alt } => out.push(format!(
                r#"<img src="{}" alt="{}" class="sn-image">"#,
                escape(path),
                escape(alt)
            )),
            ContentNode::Link { url } => {
                let url = escape(url);
                out.push(format!(r#"<p><a href="{url}" class="sn-link">{url}</a></p>"#));
            }
            ContentNode::LinkWithText { text, url } => out.push(format!(
                r#"<p><a href="{}" class="sn-link">{}</a></p>"#,
                escape(url),
                render_spans(text)
            )),
            ContentNode::CrossFileLink { location, text } => out.push(format!(
                r#"<p><a href="{}" class="sn-opensn">{}</a></p>"#,
                escape(location),
                render_spans(text)
            )),
            ContentNode::Literal { raw_line } => {
                out.push(format!(r#"<p class="sn-unknown">{}</p>"#, escape(raw_line)))
            }
        }
    }
}
