use super::keywords::{COMMENT, DECLARATION, Keyword};

/// What a single line is, judged without any surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag<'a> {
    Blank,
    Comment,
    Declaration,
    /// A line starting with a known keyword; `rest` follows its token.
    Command { keyword: Keyword, rest: &'a str },
    Freeform,
}

/// A classified line of normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The line exactly as written (no terminator).
    pub raw: &'a str,
    /// The line with surrounding whitespace removed.
    pub content: &'a str,
    pub tag: LineTag<'a>,
}

impl<'a> ClassifiedLine<'a> {
    pub fn is_blank(&self) -> bool {
        matches!(self.tag, LineTag::Blank)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.tag, LineTag::Comment)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.tag {
            LineTag::Command { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}

/// Classifies the lines of normalized (LF-only) text.
///
/// Phase 1 of parsing: every line is tagged independently. The returned
/// iterator is lazy and cheap to clone, so a caller can restart it.
#[derive(Debug, Clone)]
pub struct SnLineClassifier<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
}

impl<'a> SnLineClassifier<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate(),
        }
    }

    /// Classifies a single line.
    pub fn classify(number: usize, raw: &'a str) -> ClassifiedLine<'a> {
        let content = raw.trim();
        let tag = if content.is_empty() {
            LineTag::Blank
        } else if content.starts_with(COMMENT) {
            LineTag::Comment
        } else if content == DECLARATION {
            LineTag::Declaration
        } else if let Some((keyword, rest)) = Keyword::match_prefix(content) {
            LineTag::Command { keyword, rest }
        } else {
            LineTag::Freeform
        };
        ClassifiedLine {
            number,
            raw,
            content,
            tag,
        }
    }
}

impl<'a> Iterator for SnLineClassifier<'a> {
    type Item = ClassifiedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, raw) = self.lines.next()?;
        Some(Self::classify(idx + 1, raw))
    }
}

/// Classifies all lines into an indexable sequence.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine<'_>> {
    SnLineClassifier::new(text).collect()
}
