use super::inline::InlineError;

/// A fatal parse failure.
///
/// Every variant names the 1-based line it refers to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected `<super-notation-v1>` declaration, found {found:?}")]
    MissingOrUnsupportedDeclaration { line: usize, found: Option<String> },

    #[error("line {line}: input is not valid UTF-8 (byte offset {offset})")]
    InvalidEncoding { line: usize, offset: usize },

    #[error("line {line}: section id `{id}` already defined on line {first_line}")]
    DuplicateSectionId {
        id: String,
        line: usize,
        first_line: usize,
    },

    #[error("line {line}: unknown command `{name}`")]
    UnknownCommand { name: String, line: usize },

    #[error("line {line}: malformed `{command}` command: {reason}")]
    MalformedCommandSyntax {
        line: usize,
        command: &'static str,
        reason: String,
    },

    #[error("line {line}: `code:` block is never closed by `endcode:`")]
    UnterminatedCodeBlock { line: usize },

    #[error("line {line}: {source}")]
    MalformedInlineMarkup {
        line: usize,
        #[source]
        source: InlineError,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingOrUnsupportedDeclaration { line, .. }
            | ParseError::InvalidEncoding { line, .. }
            | ParseError::DuplicateSectionId { line, .. }
            | ParseError::UnknownCommand { line, .. }
            | ParseError::MalformedCommandSyntax { line, .. }
            | ParseError::UnterminatedCodeBlock { line }
            | ParseError::MalformedInlineMarkup { line, .. } => *line,
        }
    }
}
