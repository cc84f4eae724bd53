use super::types::SpanStyle;

/// Brace delimiters of inline markup.
pub struct Brace;

impl Brace {
    pub const OPEN: char = '{';
    pub const CLOSE: char = '}';
    pub const ESCAPED_OPEN: &'static str = "{{";
    pub const ESCAPED_CLOSE: &'static str = "}}";
    /// Ends the kind of an opener: `{b:`.
    pub const KIND_END: char = ':';
    /// Introduces a kind's value: `{color=red:`.
    pub const VALUE: char = '=';
}

/// A `{kind:` or `{kind=value:` opener found at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opener {
    Known {
        style: SpanStyle,
        /// Byte length of the opener, braces and colon included.
        len: usize,
    },
    Unknown {
        name: String,
        len: usize,
    },
}

impl Opener {
    /// Recognizes an opener at the start of `s`, which begins with `{`.
    ///
    /// Returns `None` when the brace does not introduce a `kind:` at all;
    /// such a brace is inert text.
    pub fn scan(s: &str) -> Option<Opener> {
        let body = s.strip_prefix(Brace::OPEN)?;
        let ident_len = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(body.len());
        if ident_len == 0 {
            return None;
        }
        let ident = &body[..ident_len];
        let after = &body[ident_len..];

        if after.starts_with(Brace::KIND_END) {
            let len = 1 + ident_len + 1;
            return Some(match Self::simple_style(ident) {
                Some(style) => Opener::Known { style, len },
                None => Opener::Unknown {
                    name: s[1..len].to_string(),
                    len,
                },
            });
        }

        let value_part = after.strip_prefix(Brace::VALUE)?;
        let value_len = value_part.find([Brace::KIND_END, Brace::OPEN, Brace::CLOSE])?;
        if !value_part[value_len..].starts_with(Brace::KIND_END) {
            return None;
        }
        let value = &value_part[..value_len];
        let len = 1 + ident_len + 1 + value_len + 1;
        if ident.eq_ignore_ascii_case("color") && Self::valid_color(value) {
            Some(Opener::Known {
                style: SpanStyle::Color(value.trim().to_string()),
                len,
            })
        } else {
            Some(Opener::Unknown {
                name: s[1..len].to_string(),
                len,
            })
        }
    }

    fn simple_style(ident: &str) -> Option<SpanStyle> {
        match ident.to_ascii_lowercase().as_str() {
            "b" | "bold" => Some(SpanStyle::Bold),
            "i" | "italic" => Some(SpanStyle::Italic),
            "u" => Some(SpanStyle::Underline),
            _ => None,
        }
    }

    fn valid_color(value: &str) -> bool {
        let value = value.trim();
        !value.is_empty() && !value.contains([';', '"', '\'', '<', '>'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_short_and_long_kinds() {
        assert_eq!(
            Opener::scan("{b:x}"),
            Some(Opener::Known {
                style: SpanStyle::Bold,
                len: 3
            })
        );
        assert_eq!(
            Opener::scan("{Italic:x}"),
            Some(Opener::Known {
                style: SpanStyle::Italic,
                len: 8
            })
        );
    }

    #[test]
    fn recognizes_color_values() {
        assert_eq!(
            Opener::scan("{color=#ff0000:x}"),
            Some(Opener::Known {
                style: SpanStyle::Color("#ff0000".into()),
                len: 15
            })
        );
    }

    #[test]
    fn rejects_color_values_that_escape_the_style() {
        assert_eq!(
            Opener::scan("{color=red;x:y}"),
            Some(Opener::Unknown {
                name: "color=red;x:".into(),
                len: 13
            })
        );
    }

    #[test]
    fn unknown_kind_is_reported() {
        assert_eq!(
            Opener::scan("{strike:x}"),
            Some(Opener::Unknown {
                name: "strike:".into(),
                len: 8
            })
        );
    }

    #[test]
    fn bare_braces_are_inert() {
        assert_eq!(Opener::scan("{ x }"), None);
        assert_eq!(Opener::scan("{x}"), None);
        assert_eq!(Opener::scan("{color=red}"), None);
        assert_eq!(Opener::scan("{"), None);
    }
}
