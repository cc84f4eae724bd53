use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;

use crate::parsing::inline::Span;
use crate::signing::SignatureRecord;

/// A single `meta:` entry.
///
/// `meta: author=Jane` yields key `author` and value `Jane`. A line without
/// `=` keeps its whole text as the key and an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
}

impl MetaEntry {
    pub fn parse(text: &str) -> Self {
        match text.split_once('=') {
            Some((key, value)) => Self {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => Self {
                key: text.trim().to_string(),
                value: String::new(),
            },
        }
    }
}

/// The document title from the `title:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Raw title text, braces included.
    pub text: String,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Bullet,
    Numbers,
}

impl ListStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("bullet") {
            Some(ListStyle::Bullet)
        } else if name.eq_ignore_ascii_case("numbers") {
            Some(ListStyle::Numbers)
        } else {
            None
        }
    }
}

/// A block-level node of the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    /// `sec:<id>`
    Section { id: String },
    /// `sec=<id>: <text>`
    SectionLink { target: String, text: Vec<Span> },
    /// `para: <text>`
    Paragraph { spans: Vec<Span> },
    /// `break-line`
    HorizontalRule,
    /// `olist:bullet` / `olist:numbers` followed by item lines.
    List {
        style: ListStyle,
        items: Vec<Vec<Span>>,
    },
    /// `code:` ... `endcode:`. Content is never inline-formatted.
    CodeBlock { raw: String },
    /// `img:=<path> | <alt>`
    Image { path: String, alt: String },
    /// `link: <url>`
    Link { url: String },
    /// `linktxt: <text> | <url>`
    LinkWithText { text: Vec<Span>, url: String },
    /// `opensn=<location>: <text>`
    CrossFileLink { location: String, text: Vec<Span> },
    /// Lenient fallback for a line that could not be interpreted.
    Literal { raw_line: String },
}

/// A parsed SN document.
///
/// Built once by [`crate::parse`] or [`crate::parse_bytes`]; there is no
/// mutation API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    metadata: Vec<MetaEntry>,
    title: Option<Title>,
    nodes: Vec<ContentNode>,
    forward_link: Option<RelativePathBuf>,
    signature: Option<SignatureRecord>,
    sealed: bool,
}

impl Document {
    pub(crate) fn new(
        metadata: Vec<MetaEntry>,
        title: Option<Title>,
        nodes: Vec<ContentNode>,
        forward_link: Option<RelativePathBuf>,
    ) -> Self {
        Self {
            metadata,
            title,
            nodes,
            forward_link,
            signature: None,
            sealed: false,
        }
    }

    /// Attaches the signature state derived from the raw bytes.
    pub(crate) fn with_signature(mut self, signature: Option<SignatureRecord>, sealed: bool) -> Self {
        self.signature = signature;
        self.sealed = sealed;
        self
    }

    pub fn metadata(&self) -> &[MetaEntry] {
        &self.metadata
    }

    /// Values of every metadata entry with the given key, in document order.
    pub fn meta_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.metadata
            .iter()
            .filter(move |m| m.key == key)
            .map(|m| m.value.as_str())
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Path of the next document in a multi-file reading flow.
    pub fn forward_link(&self) -> Option<&RelativePath> {
        self.forward_link.as_deref()
    }

    pub fn signature(&self) -> Option<&SignatureRecord> {
        self.signature.as_ref()
    }

    /// True when a valid signature is followed by a `close:` marker.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Index of the node a `sec=<id>` link resolves to.
    ///
    /// With duplicate ids (lenient mode only) the first definition wins.
    pub fn section_anchor(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n, ContentNode::Section { id: sid } if sid == id))
    }
}
