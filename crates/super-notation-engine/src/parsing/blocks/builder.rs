use std::collections::HashMap;

use relative_path::RelativePathBuf;

use crate::models::{ContentNode, Document, ListStyle, MetaEntry, Title};
use crate::parsing::{
    ParseError, ParseMode,
    inline::{Formatted, Span, format_inline},
    lines::{ClassifiedLine, Keyword, LineTag},
};

use super::payload;

/// Block parser states.
///
/// `InCodeBlock` and `InList` are entered from `BodyPhase` and return to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingHeader,
    MetadataPhase,
    BodyPhase,
    /// Inside `code:`; `opened_at` indexes the `code:` line.
    InCodeBlock { opened_at: usize },
    InList(ListStyle),
    Done,
}

/// The next state and the index of the next line to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    state: State,
    pos: usize,
}

impl Step {
    fn to(state: State, pos: usize) -> Self {
        Self { state, pos }
    }
}

/// Builds a [`Document`] from classified lines.
///
/// Phase 2 of parsing. The position is an explicit index into `lines`, so a
/// parse can be resumed from any state and offset with [`BlockParser::run_from`].
pub struct BlockParser<'a> {
    lines: &'a [ClassifiedLine<'a>],
    mode: ParseMode,
    metadata: Vec<MetaEntry>,
    title: Option<Title>,
    nodes: Vec<ContentNode>,
    forward_link: Option<RelativePathBuf>,
    /// First line each section id was defined on.
    sections: HashMap<String, usize>,
}

impl<'a> BlockParser<'a> {
    pub fn new(lines: &'a [ClassifiedLine<'a>], mode: ParseMode) -> Self {
        Self {
            lines,
            mode,
            metadata: vec![],
            title: None,
            nodes: vec![],
            forward_link: None,
            sections: HashMap::new(),
        }
    }

    pub fn run(self) -> Result<Document, ParseError> {
        self.run_from(State::AwaitingHeader, 0)
    }

    pub fn run_from(mut self, state: State, pos: usize) -> Result<Document, ParseError> {
        let mut step = Step::to(state, pos);
        loop {
            let next = match step.state {
                State::AwaitingHeader => self.awaiting_header(step.pos)?,
                State::MetadataPhase => self.metadata_phase(step.pos)?,
                State::BodyPhase => self.body_phase(step.pos)?,
                State::InCodeBlock { opened_at } => self.in_code_block(opened_at, step.pos)?,
                State::InList(style) => self.in_list(style, step.pos)?,
                State::Done => break,
            };
            if next.state != step.state {
                log::trace!("{:?} -> {:?} at index {}", step.state, next.state, next.pos);
            }
            step = next;
        }

        Ok(Document::new(
            self.metadata,
            self.title,
            self.nodes,
            self.forward_link,
        ))
    }

    fn awaiting_header(&mut self, pos: usize) -> Result<Step, ParseError> {
        let lines = self.lines;
        let Some(line) = lines[pos.min(lines.len())..]
            .iter()
            .find(|l| !l.is_blank() && !l.is_comment())
        else {
            return Err(ParseError::MissingOrUnsupportedDeclaration {
                line: lines.last().map_or(1, |l| l.number),
                found: None,
            });
        };

        if line.tag != LineTag::Declaration {
            return Err(ParseError::MissingOrUnsupportedDeclaration {
                line: line.number,
                found: Some(line.content.to_string()),
            });
        }
        Ok(Step::to(State::MetadataPhase, self.index_of(line) + 1))
    }

    fn metadata_phase(&mut self, pos: usize) -> Result<Step, ParseError> {
        let lines = self.lines;
        let Some(line) = lines.get(pos) else {
            return Ok(Step::to(State::Done, pos));
        };

        match line.tag {
            LineTag::Blank | LineTag::Comment => Ok(Step::to(State::MetadataPhase, pos + 1)),
            LineTag::Command {
                keyword: Keyword::Meta,
                rest,
            } => {
                self.metadata.push(MetaEntry::parse(rest));
                Ok(Step::to(State::MetadataPhase, pos + 1))
            }
            LineTag::Command {
                keyword: Keyword::Title,
                rest,
            } if self.title.is_none() => {
                let text = rest.trim();
                let spans = self.spans(text, line.number)?;
                self.title = Some(Title {
                    text: text.to_string(),
                    spans,
                });
                Ok(Step::to(State::MetadataPhase, pos + 1))
            }
            LineTag::Command {
                keyword: Keyword::Sign,
                ..
            } => Ok(self.end_at_signature(line)),
            // Re-dispatched, not consumed.
            _ => Ok(Step::to(State::BodyPhase, pos)),
        }
    }

    fn body_phase(&mut self, pos: usize) -> Result<Step, ParseError> {
        let lines = self.lines;
        let Some(line) = lines.get(pos) else {
            return Ok(Step::to(State::Done, pos));
        };
        let next = Step::to(State::BodyPhase, pos + 1);

        let (keyword, rest) = match line.tag {
            LineTag::Blank | LineTag::Comment => return Ok(next),
            LineTag::Declaration => {
                self.malformed(line, "declaration", "repeated declaration".to_string())?;
                return Ok(next);
            }
            LineTag::Freeform => {
                self.unknown(line)?;
                return Ok(next);
            }
            LineTag::Command { keyword, rest } => (keyword, rest),
        };

        match keyword {
            Keyword::Meta => self.malformed(
                line,
                keyword.name(),
                "metadata must precede the first content node".to_string(),
            )?,
            Keyword::Title => self.malformed(
                line,
                keyword.name(),
                "the title must precede the first content node".to_string(),
            )?,
            Keyword::Section => self.section(line, rest)?,
            Keyword::SectionLink => match payload::section_link(rest) {
                Ok((target, text)) => {
                    let text = self.spans(text, line.number)?;
                    self.nodes.push(ContentNode::SectionLink {
                        target: target.to_string(),
                        text,
                    });
                }
                Err(reason) => self.malformed(line, keyword.name(), reason)?,
            },
            Keyword::Paragraph => {
                let spans = self.spans(rest.trim(), line.number)?;
                self.nodes.push(ContentNode::Paragraph { spans });
            }
            Keyword::BreakLine => {
                if rest.trim().is_empty() {
                    self.nodes.push(ContentNode::HorizontalRule);
                } else {
                    self.malformed(line, keyword.name(), format!("unexpected `{}`", rest.trim()))?;
                }
            }
            Keyword::List => match ListStyle::from_name(rest.trim()) {
                Some(style) => return Ok(Step::to(State::InList(style), pos + 1)),
                None => self.malformed(
                    line,
                    keyword.name(),
                    format!("unknown list style `{}`, expected `bullet` or `numbers`", rest.trim()),
                )?,
            },
            Keyword::Code => {
                if rest.trim().is_empty() {
                    return Ok(Step::to(State::InCodeBlock { opened_at: pos }, pos + 1));
                }
                self.malformed(line, keyword.name(), "`code:` must stand alone on its line".to_string())?;
            }
            Keyword::EndCode => self.malformed(
                line,
                keyword.name(),
                "`endcode:` without an open `code:` block".to_string(),
            )?,
            Keyword::Image => match payload::image(rest) {
                Ok((path, alt)) => self.nodes.push(ContentNode::Image {
                    path: path.to_string(),
                    alt: alt.to_string(),
                }),
                Err(reason) => match self.mode {
                    ParseMode::Lenient if !rest.trim().is_empty() => {
                        log::warn!("line {}: {reason}; using empty alt text", line.number);
                        self.nodes.push(ContentNode::Image {
                            path: rest.trim().to_string(),
                            alt: String::new(),
                        });
                    }
                    _ => self.malformed(line, keyword.name(), reason)?,
                },
            },
            Keyword::Link => match payload::required(rest, "URL") {
                Ok(url) => self.nodes.push(ContentNode::Link { url }),
                Err(reason) => self.malformed(line, keyword.name(), reason)?,
            },
            Keyword::LinkText => {
                let (text, url) = match (payload::link_text(rest), self.mode) {
                    (Ok(parts), _) => parts,
                    (Err(reason), ParseMode::Strict) => {
                        return Err(self.malformed_error(line, keyword.name(), reason));
                    }
                    (Err(reason), ParseMode::Lenient) => {
                        log::warn!("line {}: {reason}; guessing link parts", line.number);
                        payload::link_text_fallback(rest)
                    }
                };
                let text = self.spans(text, line.number)?;
                self.nodes.push(ContentNode::LinkWithText {
                    text,
                    url: url.to_string(),
                });
            }
            Keyword::OpenSn => match payload::cross_file(rest) {
                Ok((location, text)) => {
                    let text = self.spans(text, line.number)?;
                    self.nodes.push(ContentNode::CrossFileLink {
                        location: location.to_string(),
                        text,
                    });
                }
                Err(reason) => self.malformed(line, keyword.name(), reason)?,
            },
            Keyword::EndNewSn => match payload::required(rest, "target path") {
                Ok(path) => {
                    if let Some(previous) = &self.forward_link {
                        log::warn!(
                            "line {}: forward link `{previous}` replaced by `{path}`",
                            line.number
                        );
                    }
                    self.forward_link = Some(RelativePathBuf::from(path));
                    if self.mode == ParseMode::Strict {
                        log::debug!("line {}: endnewsn: ends the body", line.number);
                        return Ok(Step::to(State::Done, pos + 1));
                    }
                }
                Err(reason) => self.malformed(line, keyword.name(), reason)?,
            },
            Keyword::Sign => return Ok(self.end_at_signature(line)),
            Keyword::Close => log::debug!("line {}: skipping seal marker", line.number),
        }

        Ok(next)
    }

    fn in_code_block(&mut self, opened_at: usize, pos: usize) -> Result<Step, ParseError> {
        let lines = self.lines;
        let body = &lines[pos.min(lines.len())..];
        let Some(end) = body
            .iter()
            .position(|l| l.raw.trim().eq_ignore_ascii_case(Keyword::EndCode.token()))
        else {
            return Err(ParseError::UnterminatedCodeBlock {
                line: lines[opened_at].number,
            });
        };

        let raw = body[..end]
            .iter()
            .map(|l| l.raw)
            .collect::<Vec<_>>()
            .join("\n");
        self.nodes.push(ContentNode::CodeBlock { raw });
        Ok(Step::to(State::BodyPhase, pos + end + 1))
    }

    fn in_list(&mut self, style: ListStyle, pos: usize) -> Result<Step, ParseError> {
        let lines = self.lines;
        let mut items = vec![];
        let mut idx = pos;
        while let Some(line) = lines.get(idx) {
            match line.tag {
                LineTag::Blank | LineTag::Command { .. } => break,
                LineTag::Comment => {}
                LineTag::Declaration | LineTag::Freeform => {
                    items.push(self.spans(line.content, line.number)?);
                }
            }
            idx += 1;
        }

        self.nodes.push(ContentNode::List { style, items });
        Ok(Step::to(State::BodyPhase, idx))
    }

    fn section(&mut self, line: &ClassifiedLine<'_>, rest: &str) -> Result<(), ParseError> {
        let id = match payload::section_id(rest) {
            Ok(id) => id,
            Err(reason) => return self.malformed(line, Keyword::Section.name(), reason),
        };

        if let Some(&first_line) = self.sections.get(id) {
            let err = ParseError::DuplicateSectionId {
                id: id.to_string(),
                line: line.number,
                first_line,
            };
            match self.mode {
                ParseMode::Strict => return Err(err),
                ParseMode::Lenient => log::warn!("{err}; links resolve to the first definition"),
            }
        } else {
            self.sections.insert(id.to_string(), line.number);
        }

        self.nodes.push(ContentNode::Section { id: id.to_string() });
        Ok(())
    }

    /// `sign:` ends body processing: what follows is not document content.
    fn end_at_signature(&self, line: &ClassifiedLine<'_>) -> Step {
        log::debug!("line {}: signature line ends the body", line.number);
        Step::to(State::Done, self.lines.len())
    }

    /// Formats inline text, failing on the first markup error in strict mode.
    fn spans(&self, text: &str, line: usize) -> Result<Vec<Span>, ParseError> {
        let Formatted { spans, errors } = format_inline(text);
        if let Some(first) = errors.into_iter().next() {
            let err = ParseError::MalformedInlineMarkup {
                line,
                source: first,
            };
            match self.mode {
                ParseMode::Strict => return Err(err),
                ParseMode::Lenient => log::warn!("{err}"),
            }
        }
        Ok(spans)
    }

    fn unknown(&mut self, line: &ClassifiedLine<'_>) -> Result<(), ParseError> {
        let name = line
            .content
            .split([':', '='])
            .next()
            .unwrap_or(line.content)
            .trim();
        self.recover(
            line,
            ParseError::UnknownCommand {
                name: name.to_string(),
                line: line.number,
            },
        )
    }

    fn malformed(
        &mut self,
        line: &ClassifiedLine<'_>,
        command: &'static str,
        reason: String,
    ) -> Result<(), ParseError> {
        let err = self.malformed_error(line, command, reason);
        self.recover(line, err)
    }

    fn malformed_error(
        &self,
        line: &ClassifiedLine<'_>,
        command: &'static str,
        reason: String,
    ) -> ParseError {
        ParseError::MalformedCommandSyntax {
            line: line.number,
            command,
            reason,
        }
    }

    /// Strict mode fails; lenient mode keeps the line as literal text.
    fn recover(&mut self, line: &ClassifiedLine<'_>, err: ParseError) -> Result<(), ParseError> {
        match self.mode {
            ParseMode::Strict => Err(err),
            ParseMode::Lenient => {
                log::warn!("{err}; kept as literal text");
                self.nodes.push(ContentNode::Literal {
                    raw_line: line.raw.to_string(),
                });
                Ok(())
            }
        }
    }

    fn index_of(&self, line: &ClassifiedLine<'_>) -> usize {
        line.number - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::lines::classify_lines;
    use pretty_assertions::assert_eq;

    fn body(text: &str, mode: ParseMode) -> Result<Document, ParseError> {
        let lines = classify_lines(text);
        BlockParser::new(&lines, mode).run_from(State::BodyPhase, 0)
    }

    #[test]
    fn resumes_from_any_offset() {
        let text = "<super-notation-v1>\npara: one\npara: two";
        let lines = classify_lines(text);
        let doc = BlockParser::new(&lines, ParseMode::Strict)
            .run_from(State::BodyPhase, 2)
            .unwrap();
        assert_eq!(
            doc.nodes(),
            &[ContentNode::Paragraph {
                spans: vec![Span::text("two")]
            }]
        );
    }

    #[test]
    fn metadata_phase_hands_first_content_line_to_body() {
        let lines = classify_lines("meta: a=1\n\ntitle: T\npara: p");
        let doc = BlockParser::new(&lines, ParseMode::Strict)
            .run_from(State::MetadataPhase, 0)
            .unwrap();
        assert_eq!(doc.metadata().len(), 1);
        assert_eq!(doc.title().map(|t| t.text.as_str()), Some("T"));
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn second_title_goes_to_body() {
        let lines = classify_lines("title: A\ntitle: B");
        let err = BlockParser::new(&lines, ParseMode::Strict)
            .run_from(State::MetadataPhase, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedCommandSyntax {
                line: 2,
                command: "title",
                ..
            }
        ));
    }

    #[test]
    fn list_stops_at_command_without_consuming_it() {
        let doc = body("olist:bullet\none\n# skipped\ntwo\npara: after", ParseMode::Strict).unwrap();
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::List {
                    style: ListStyle::Bullet,
                    items: vec![vec![Span::text("one")], vec![Span::text("two")]],
                },
                ContentNode::Paragraph {
                    spans: vec![Span::text("after")]
                },
            ]
        );
    }

    #[test]
    fn list_stops_at_blank_line() {
        let doc = body("olist:numbers\n{b:one}\n\nstray", ParseMode::Lenient).unwrap();
        assert_eq!(
            doc.nodes(),
            &[
                ContentNode::List {
                    style: ListStyle::Numbers,
                    items: vec![vec![Span::Bold(vec![Span::text("one")])]],
                },
                ContentNode::Literal {
                    raw_line: "stray".into()
                },
            ]
        );
    }

    #[test]
    fn empty_list_is_kept() {
        let doc = body("olist:bullet\npara: x", ParseMode::Strict).unwrap();
        assert_eq!(
            doc.nodes()[0],
            ContentNode::List {
                style: ListStyle::Bullet,
                items: vec![]
            }
        );
    }

    #[test]
    fn code_block_keeps_raw_lines() {
        let doc = body("code:\n  para: x\n{b:y}\n\nENDCODE:\npara: z", ParseMode::Strict).unwrap();
        assert_eq!(
            doc.nodes()[0],
            ContentNode::CodeBlock {
                raw: "  para: x\n{b:y}\n".into()
            }
        );
        assert_eq!(doc.nodes().len(), 2);
    }

    #[test]
    fn unterminated_code_block_names_opening_line() {
        for mode in [ParseMode::Strict, ParseMode::Lenient] {
            let err = body("para: a\ncode:\nx", mode).unwrap_err();
            assert_eq!(err, ParseError::UnterminatedCodeBlock { line: 2 });
        }
    }

    #[test]
    fn stray_endcode_is_malformed() {
        let err = body("endcode:", ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedCommandSyntax {
                command: "endcode",
                ..
            }
        ));
    }

    #[test]
    fn sign_line_ends_body_in_every_phase() {
        let lines = classify_lines("meta: a\nsign: SHA256-00\nmeta: b");
        let doc = BlockParser::new(&lines, ParseMode::Strict)
            .run_from(State::MetadataPhase, 0)
            .unwrap();
        assert_eq!(doc.metadata().len(), 1);

        let doc = body("para: a\nsign: x\nunknown junk", ParseMode::Strict).unwrap();
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn close_marker_is_not_content() {
        let doc = body("close:\npara: a", ParseMode::Strict).unwrap();
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn unknown_command_name_stops_at_separator() {
        let err = body("foo= bar: baz", ParseMode::Strict).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCommand {
                name: "foo".into(),
                line: 1
            }
        );
    }

    #[test]
    fn lenient_image_without_pipe_has_empty_alt() {
        let doc = body("img:=pic.png", ParseMode::Lenient).unwrap();
        assert_eq!(
            doc.nodes()[0],
            ContentNode::Image {
                path: "pic.png".into(),
                alt: String::new()
            }
        );
        assert!(body("img:=pic.png", ParseMode::Strict).is_err());
    }

    #[test]
    fn lenient_link_text_falls_back_to_colon() {
        let doc = body("linktxt: Home: index.html", ParseMode::Lenient).unwrap();
        assert_eq!(
            doc.nodes()[0],
            ContentNode::LinkWithText {
                text: vec![Span::text("Home")],
                url: "index.html".into()
            }
        );
    }

    #[test]
    fn strict_rejects_unknown_inline_kind() {
        let err = body("para: {strike:x}", ParseMode::Strict).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInlineMarkup { line: 1, .. }));
    }

    #[test]
    fn lenient_keeps_unknown_inline_kind_as_text() {
        let doc = body("para: {strike:x}", ParseMode::Lenient).unwrap();
        assert_eq!(
            doc.nodes()[0],
            ContentNode::Paragraph {
                spans: vec![Span::text("{strike:x}")]
            }
        );
    }
}
