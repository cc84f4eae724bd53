use serde::Serialize;

/// A node of the inline formatting tree. `Text` is always a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Underline(Vec<Span>),
    Color { value: String, children: Vec<Span> },
}

impl Span {
    pub fn text(s: impl Into<String>) -> Self {
        Span::Text(s.into())
    }

    /// The text content with all formatting removed.
    pub fn plain_text(spans: &[Span]) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Span> = spans.iter().rev().collect();
        while let Some(span) = stack.pop() {
            match span {
                Span::Text(t) => out.push_str(t),
                Span::Bold(c) | Span::Italic(c) | Span::Underline(c) => {
                    stack.extend(c.iter().rev())
                }
                Span::Color { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        out
    }
}

/// The formatting a brace group applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanStyle {
    Bold,
    Italic,
    Underline,
    Color(String),
}

impl SpanStyle {
    pub fn wrap(self, children: Vec<Span>) -> Span {
        match self {
            SpanStyle::Bold => Span::Bold(children),
            SpanStyle::Italic => Span::Italic(children),
            SpanStyle::Underline => Span::Underline(children),
            SpanStyle::Color(value) => Span::Color { value, children },
        }
    }
}

/// A problem found while formatting inline markup.
///
/// Columns are 1-based character positions within the formatted text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
    #[error("unterminated `{{{opener}` group opened at column {column}")]
    Unterminated { opener: String, column: usize },
    #[error("unknown inline markup `{{{name}` at column {column}")]
    UnknownKind { name: String, column: usize },
    #[error("groups nested deeper than {limit} at column {column}; opener kept as text")]
    TooDeep { limit: usize, column: usize },
}

impl InlineError {
    pub fn column(&self) -> usize {
        match self {
            InlineError::Unterminated { column, .. }
            | InlineError::UnknownKind { column, .. }
            | InlineError::TooDeep { column, .. } => *column,
        }
    }
}

/// Result of formatting one line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatted {
    pub spans: Vec<Span>,
    pub errors: Vec<InlineError>,
}
