//! End-to-end tests for [`crate::parsing::parse`].

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{ContentNode, ListStyle};
use crate::parsing::inline::{InlineError, MAX_DEPTH, Span};
use crate::parsing::{ParseError, ParseMode, parse, parse_bytes};

const DECL: &str = "<super-notation-v1>";

fn doc(body: &str) -> String {
    format!("{DECL}\n{body}")
}

fn t(s: &str) -> Span {
    Span::text(s)
}

#[rstest]
#[case(ParseMode::Lenient)]
#[case(ParseMode::Strict)]
fn bold_paragraph(#[case] mode: ParseMode) {
    let parsed = parse(&doc("para: Hi {b:there}\n"), mode).unwrap();
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Paragraph {
            spans: vec![t("Hi "), Span::Bold(vec![t("there")])],
        }]
    );
}

#[test]
fn escaped_braces_are_literal_text() {
    let parsed = parse(&doc("para: {{a}}\n"), ParseMode::Strict).unwrap();
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Paragraph {
            spans: vec![t("{a}")],
        }]
    );
}

#[test]
fn duplicate_section_is_fatal_in_strict_mode() {
    let err = parse(&doc("sec:a\nsec:a\n"), ParseMode::Strict).unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateSectionId {
            id: "a".into(),
            line: 3,
            first_line: 2,
        }
    );
}

#[test]
fn duplicate_section_is_kept_in_lenient_mode() {
    let parsed = parse(&doc("sec:a\nsec:a\n"), ParseMode::Lenient).unwrap();
    assert_eq!(parsed.nodes().len(), 2);
    assert_eq!(parsed.section_anchor("a"), Some(0));
}

#[test]
fn unknown_command_strict_and_lenient() {
    let text = doc("\nfoo: bar\n");
    assert_eq!(
        parse(&text, ParseMode::Strict).unwrap_err(),
        ParseError::UnknownCommand {
            name: "foo".into(),
            line: 3,
        }
    );
    let parsed = parse(&text, ParseMode::Lenient).unwrap();
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Literal {
            raw_line: "foo: bar".into(),
        }]
    );
}

#[test]
fn code_block_content_is_not_interpreted() {
    let parsed = parse(
        &doc("code:\npara: x\n  {b:y}\nendcode:\npara: after\n"),
        ParseMode::Strict,
    )
    .unwrap();
    assert_eq!(
        parsed.nodes(),
        &[
            ContentNode::CodeBlock {
                raw: "para: x\n  {b:y}".into(),
            },
            ContentNode::Paragraph {
                spans: vec![t("after")],
            },
        ]
    );
}

#[test]
fn strict_forward_link_ends_the_document() {
    let parsed = parse(
        &doc("para: one\nendnewsn: next.sn\nfoo: ignored\n"),
        ParseMode::Strict,
    )
    .unwrap();
    assert_eq!(parsed.nodes().len(), 1);
    assert_eq!(parsed.forward_link().map(|p| p.as_str()), Some("next.sn"));
}

#[test]
fn lenient_forward_link_keeps_trailing_content() {
    let parsed = parse(
        &doc("endnewsn: a.sn\npara: tail\nendnewsn: b.sn\n"),
        ParseMode::Lenient,
    )
    .unwrap();
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Paragraph {
            spans: vec![t("tail")],
        }]
    );
    assert_eq!(parsed.forward_link().map(|p| p.as_str()), Some("b.sn"));
}

#[rstest]
#[case("")]
#[case("\n\n# only a comment\n")]
#[case("title: no declaration\n")]
#[case("<super-notation-v2>\n")]
fn missing_declaration_is_fatal_in_both_modes(#[case] text: &str) {
    for mode in [ParseMode::Strict, ParseMode::Lenient] {
        let err = parse(text, mode).unwrap_err();
        assert!(
            matches!(err, ParseError::MissingOrUnsupportedDeclaration { .. }),
            "{err:?}"
        );
    }
}

#[test]
fn comments_and_blanks_may_precede_declaration() {
    let parsed = parse(&format!("# intro\n\n{DECL}\ntitle: T\n"), ParseMode::Strict).unwrap();
    assert_eq!(parsed.title().map(|t| t.text.as_str()), Some("T"));
}

#[test]
fn bom_and_crlf_are_normalized() {
    let text = format!("\u{feff}{DECL}\r\ntitle: T\r\npara: x\r\n");
    let parsed = parse(&text, ParseMode::Strict).unwrap();
    assert_eq!(parsed.title().map(|t| t.text.as_str()), Some("T"));
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Paragraph {
            spans: vec![t("x")],
        }]
    );
}

#[test]
fn metadata_and_title_are_collected() {
    let parsed = parse(
        &doc("meta: author=Ada\nmeta: tag=x\ntitle: {i:Hello}\n\nsec:intro\n"),
        ParseMode::Strict,
    )
    .unwrap();
    assert_eq!(parsed.meta_values("author").collect::<Vec<_>>(), vec!["Ada"]);
    let title = parsed.title().unwrap();
    assert_eq!(title.spans, vec![Span::Italic(vec![t("Hello")])]);
    assert_eq!(parsed.nodes(), &[ContentNode::Section { id: "intro".into() }]);
}

#[test]
fn numbered_list_collects_items() {
    let parsed = parse(&doc("olist:numbers\none\n# skip\n{b:two}\n\npara: p\n"), ParseMode::Strict)
        .unwrap();
    assert_eq!(
        parsed.nodes()[0],
        ContentNode::List {
            style: ListStyle::Numbers,
            items: vec![vec![t("one")], vec![Span::Bold(vec![t("two")])]],
        }
    );
}

#[test]
fn every_link_form_is_recognized() {
    let parsed = parse(
        &doc(concat!(
            "sec=intro: back to {b:intro}\n",
            "img:=cat.png | A cat\n",
            "link: https://example.com\n",
            "linktxt: Example | https://example.com\n",
            "opensn=other.sn: Other\n",
        )),
        ParseMode::Strict,
    )
    .unwrap();
    assert_eq!(
        parsed.nodes(),
        &[
            ContentNode::SectionLink {
                target: "intro".into(),
                text: vec![t("back to "), Span::Bold(vec![t("intro")])],
            },
            ContentNode::Image {
                path: "cat.png".into(),
                alt: "A cat".into(),
            },
            ContentNode::Link {
                url: "https://example.com".into(),
            },
            ContentNode::LinkWithText {
                text: vec![t("Example")],
                url: "https://example.com".into(),
            },
            ContentNode::CrossFileLink {
                location: "other.sn".into(),
                text: vec![t("Other")],
            },
        ]
    );
}

#[test]
fn unterminated_group_is_fatal_only_in_strict_mode() {
    let text = doc("para: {b:open\n");
    assert!(matches!(
        parse(&text, ParseMode::Strict).unwrap_err(),
        ParseError::MalformedInlineMarkup { line: 2, .. }
    ));
    let parsed = parse(&text, ParseMode::Lenient).unwrap();
    assert_eq!(
        parsed.nodes(),
        &[ContentNode::Paragraph {
            spans: vec![Span::Bold(vec![t("open")])],
        }]
    );
}

#[test]
fn very_deep_groups_parse_render_and_drop() {
    let depth = 150_000;
    let text = doc(&format!("para: {}x{}\n", "{b:".repeat(depth), " }".repeat(depth)));

    let parsed = parse(&text, ParseMode::Lenient).unwrap();
    let html = crate::render::render_spans(match &parsed.nodes()[0] {
        ContentNode::Paragraph { spans } => spans,
        other => panic!("expected a paragraph, got {other:?}"),
    });
    assert_eq!(html.matches("<strong>").count(), MAX_DEPTH);
    assert!(html.contains("{b:"));
    drop(parsed);

    assert!(matches!(
        parse(&text, ParseMode::Strict).unwrap_err(),
        ParseError::MalformedInlineMarkup {
            line: 2,
            source: InlineError::TooDeep { .. },
        }
    ));
}

#[test]
fn parse_bytes_reports_line_of_invalid_utf8() {
    let mut bytes = doc("para: ok\n").into_bytes();
    bytes.extend_from_slice(b"para: \xFF\n");
    assert_eq!(
        parse_bytes(&bytes, ParseMode::Lenient).unwrap_err(),
        ParseError::InvalidEncoding {
            line: 3,
            offset: bytes.len() - 2,
        }
    );
}

#[test]
fn parse_bytes_attaches_signature_state() {
    let body = doc("para: signed\n");
    let sealed = crate::signing::seal(body.as_bytes()).unwrap();
    let parsed = parse_bytes(&sealed, ParseMode::Strict).unwrap();
    assert!(parsed.is_sealed());
    assert!(parsed.signature().is_some());
    assert_eq!(parsed.nodes().len(), 1);

    let plain = parse_bytes(body.as_bytes(), ParseMode::Strict).unwrap();
    assert!(!plain.is_sealed());
    assert_eq!(plain.signature(), None);
}

#[test]
fn tampered_signature_is_recorded_but_not_sealed() {
    let body = doc("para: signed\n");
    let sealed = String::from_utf8(crate::signing::seal(body.as_bytes()).unwrap()).unwrap();
    let tampered = sealed.replace("signed", "forged");
    let parsed = parse_bytes(tampered.as_bytes(), ParseMode::Strict).unwrap();
    assert!(parsed.signature().is_some());
    assert!(!parsed.is_sealed());
}

#[test]
fn invalid_utf8_line_counts_bare_carriage_returns() {
    let mut bytes = format!("{DECL}\rpara: a\r\npara: b\r").into_bytes();
    bytes.extend_from_slice(b"para: \xFF\r");
    let offset = bytes.len() - 2;
    assert_eq!(
        parse_bytes(&bytes, ParseMode::Lenient).unwrap_err(),
        ParseError::InvalidEncoding { line: 4, offset }
    );
}
