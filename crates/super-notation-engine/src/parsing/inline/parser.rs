use super::{
    cursor::Cursor,
    kinds::{Brace, Opener},
    types::{Formatted, InlineError, Span, SpanStyle},
};

/// Deepest group nesting kept as spans. Openers past it stay literal text.
pub const MAX_DEPTH: usize = 128;

/// An open brace group awaiting its `}`.
struct Frame {
    style: SpanStyle,
    children: Vec<Span>,
    /// Opener text without the leading brace, for error messages.
    opener: String,
    column: usize,
}

/// Formats one line of text into a span tree.
///
/// A single left-to-right scan with an explicit stack of open groups, so
/// brace depth never turns into call depth.
///
/// # Rules
/// - `{{` and `}}` are literal braces and never open or close a group
/// - `{b:` `{bold:` `{i:` `{italic:` `{u:` `{color=<value>:` open a group
/// - `{name:` with any other name stays literal text and records an error
/// - any other `{`, and a `}` with no open group, is literal text
/// - groups still open at the end are closed implicitly, each recording an
///   [`InlineError::Unterminated`]
/// - openers past [`MAX_DEPTH`] stay literal along with their closers, and
///   the first one records an [`InlineError::TooDeep`]
pub fn format_inline(s: &str) -> Formatted {
    let mut cur = Cursor::new(s);
    let mut root: Vec<Span> = vec![];
    let mut stack: Vec<Frame> = vec![];
    let mut text = String::new();
    let mut errors = vec![];
    // Literal openers past the depth limit still waiting for their `}`.
    let mut overflow = 0usize;
    let mut too_deep = false;

    while !cur.eof() {
        if cur.starts_with(Brace::ESCAPED_OPEN) {
            text.push(Brace::OPEN);
            cur.bump_n(Brace::ESCAPED_OPEN.len());
            continue;
        }
        if cur.starts_with(Brace::ESCAPED_CLOSE) {
            text.push(Brace::CLOSE);
            cur.bump_n(Brace::ESCAPED_CLOSE.len());
            continue;
        }

        match cur.peek() {
            Some(Brace::OPEN) => match Opener::scan(cur.rest()) {
                Some(Opener::Known { len, .. }) if stack.len() >= MAX_DEPTH => {
                    if !too_deep {
                        too_deep = true;
                        errors.push(InlineError::TooDeep {
                            limit: MAX_DEPTH,
                            column: cur.column(),
                        });
                    }
                    overflow += 1;
                    text.push_str(&cur.rest()[..len]);
                    cur.bump_n(len);
                    continue;
                }
                Some(Opener::Known { style, len }) => {
                    flush_text(target(&mut root, &mut stack), &mut text);
                    stack.push(Frame {
                        style,
                        children: vec![],
                        opener: cur.rest()[1..len].to_string(),
                        column: cur.column(),
                    });
                    cur.bump_n(len);
                    continue;
                }
                Some(Opener::Unknown { name, len }) => {
                    errors.push(InlineError::UnknownKind {
                        name,
                        column: cur.column(),
                    });
                    text.push_str(&cur.rest()[..len]);
                    cur.bump_n(len);
                    continue;
                }
                None => {}
            },
            Some(Brace::CLOSE) if overflow > 0 => {
                overflow -= 1;
                text.push(Brace::CLOSE);
                cur.bump();
                continue;
            }
            Some(Brace::CLOSE) if !stack.is_empty() => {
                close_frame(&mut root, &mut stack, &mut text);
                cur.bump();
                continue;
            }
            _ => {}
        }

        if let Some(c) = cur.bump() {
            text.push(c);
        }
    }

    while let Some(frame) = stack.last() {
        errors.push(InlineError::Unterminated {
            opener: frame.opener.clone(),
            column: frame.column,
        });
        close_frame(&mut root, &mut stack, &mut text);
    }
    flush_text(&mut root, &mut text);

    // Innermost groups are closed first; report them in source order.
    errors.sort_by_key(InlineError::column);

    Formatted {
        spans: root,
        errors,
    }
}

/// The children list new content is appended to.
fn target<'a>(root: &'a mut Vec<Span>, stack: &'a mut [Frame]) -> &'a mut Vec<Span> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

fn flush_text(out: &mut Vec<Span>, text: &mut String) {
    if !text.is_empty() {
        out.push(Span::Text(std::mem::take(text)));
    }
}

/// Pops the innermost group and appends it to its parent.
fn close_frame(root: &mut Vec<Span>, stack: &mut Vec<Frame>, text: &mut String) {
    let Some(mut frame) = stack.pop() else {
        return;
    };
    flush_text(&mut frame.children, text);
    let span = frame.style.wrap(frame.children);
    target(root, stack).push(span);
}
