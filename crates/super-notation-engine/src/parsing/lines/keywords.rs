/// The fixed SN command vocabulary.
///
/// Each keyword owns its line-initial token, separator included, so the
/// classifier and the block parser never hardcode command spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Meta,
    Title,
    Section,
    SectionLink,
    Paragraph,
    BreakLine,
    List,
    Code,
    EndCode,
    Image,
    Link,
    LinkText,
    OpenSn,
    EndNewSn,
    Sign,
    Close,
}

impl Keyword {
    pub const ALL: [Keyword; 16] = [
        Keyword::Meta,
        Keyword::Title,
        Keyword::Section,
        Keyword::SectionLink,
        Keyword::Paragraph,
        Keyword::BreakLine,
        Keyword::List,
        Keyword::Code,
        Keyword::EndCode,
        Keyword::Image,
        Keyword::LinkText,
        Keyword::Link,
        Keyword::OpenSn,
        Keyword::EndNewSn,
        Keyword::Sign,
        Keyword::Close,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Keyword::Meta => "meta:",
            Keyword::Title => "title:",
            Keyword::Section => "sec:",
            Keyword::SectionLink => "sec=",
            Keyword::Paragraph => "para:",
            Keyword::BreakLine => "break-line",
            Keyword::List => "olist:",
            Keyword::Code => "code:",
            Keyword::EndCode => "endcode:",
            Keyword::Image => "img:=",
            Keyword::Link => "link:",
            Keyword::LinkText => "linktxt:",
            Keyword::OpenSn => "opensn=",
            Keyword::EndNewSn => "endnewsn:",
            Keyword::Sign => "sign:",
            Keyword::Close => "close:",
        }
    }

    /// Name used in error messages, without the separator.
    pub const fn name(self) -> &'static str {
        match self {
            Keyword::Meta => "meta",
            Keyword::Title => "title",
            Keyword::Section | Keyword::SectionLink => "sec",
            Keyword::Paragraph => "para",
            Keyword::BreakLine => "break-line",
            Keyword::List => "olist",
            Keyword::Code => "code",
            Keyword::EndCode => "endcode",
            Keyword::Image => "img",
            Keyword::Link => "link",
            Keyword::LinkText => "linktxt",
            Keyword::OpenSn => "opensn",
            Keyword::EndNewSn => "endnewsn",
            Keyword::Sign => "sign",
            Keyword::Close => "close",
        }
    }

    /// Matches the start of a trimmed line, ASCII case-insensitively.
    ///
    /// Returns the keyword and the remainder after its token.
    pub fn match_prefix(content: &str) -> Option<(Keyword, &str)> {
        Self::ALL.into_iter().find_map(|kw| {
            let token = kw.token();
            let head = content.get(..token.len())?;
            if !head.eq_ignore_ascii_case(token) {
                return None;
            }
            let mut rest = &content[token.len()..];
            if kw == Keyword::BreakLine {
                rest = rest.strip_prefix(':').unwrap_or(rest);
            }
            Some((kw, rest))
        })
    }
}

/// The mandatory first content-bearing line.
pub const DECLARATION: &str = "<super-notation-v1>";

/// Leading character of a comment line.
pub const COMMENT: char = '#';
