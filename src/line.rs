//! Classification of single INI lines.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. **Section header**: first non-whitespace character is `[`
//! 2. **Comment**: first non-whitespace character is `#` or `;`
//! 3. **Assignment**: the line contains `=` (or `:` as a fallback)
//! 4. **Blank**: only whitespace
//! 5. **Raw**: anything else, kept verbatim
//!
//! ```rust
//! use serde_ini::line::{classify, LineKind};
//! use serde_ini::IniOptions;
//!
//! let options = IniOptions::default();
//! assert_eq!(
//!     classify("[[nested]]", &options),
//!     LineKind::SectionHeader { name: "nested", depth: 2, comment: None }
//! );
//! assert!(matches!(classify("[a=b]", &options), LineKind::SectionHeader { .. }));
//! assert_eq!(classify("   ", &options), LineKind::Blank);
//! ```

use crate::document::InlineComment;
use crate::IniOptions;

/// What a single line contributes to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    SectionHeader {
        name: &'a str,
        depth: usize,
        comment: Option<InlineComment>,
    },
    Assignment {
        key: &'a str,
        separator: char,
        value: &'a str,
        comment: Option<InlineComment>,
    },
    Comment {
        delimiter: char,
        text: &'a str,
    },
    Blank,
    Raw(&'a str),
}

/// Classifies one logical line (continuations already joined).
///
/// # Examples
///
/// ```rust
/// use serde_ini::line::{classify, LineKind};
/// use serde_ini::IniOptions;
///
/// let kind = classify("port = 8080 ; default", &IniOptions::default());
/// match kind {
///     LineKind::Assignment { key, value, comment, .. } => {
///         assert_eq!(key, "port");
///         assert_eq!(value, "8080");
///         assert_eq!(comment.unwrap().text, " default");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[must_use]
pub fn classify<'a>(line: &'a str, options: &IniOptions) -> LineKind<'a> {
    let content = line.trim_start();

    if content.starts_with('[') {
        return match parse_header(content.trim_end(), options) {
            Some((name, depth, comment)) => LineKind::SectionHeader {
                name,
                depth,
                comment,
            },
            None => LineKind::Raw(line),
        };
    }

    if let Some(delimiter) = content.chars().next().filter(|&c| c == '#' || c == ';') {
        return LineKind::Comment {
            delimiter,
            text: &content[1..],
        };
    }

    if let Some(assignment) = parse_assignment(line, options) {
        return assignment;
    }

    if content.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Raw(line)
    }
}

/// Returns the text before a trailing line-continuation backslash.
#[inline]
#[must_use]
pub fn strip_continuation(line: &str) -> Option<&str> {
    line.strip_suffix('\\')
}

/// `[name]`, `[[name]]`, ... Depth is the smaller of the two bracket runs, so a
/// lopsided header keeps its extra brackets in the name.
///
/// The header closes at the first `]` followed only by whitespace or, with
/// inline comments enabled, a comment.
fn parse_header<'a>(
    content: &'a str,
    options: &IniOptions,
) -> Option<(&'a str, usize, Option<InlineComment>)> {
    let (close_at, comment) = content
        .match_indices(']')
        .find_map(|(at, _)| header_tail(&content[at + 1..], options).map(|c| (at, c)))?;

    let body = &content[..=close_at];
    let open = body.bytes().take_while(|&b| b == b'[').count();
    let close = body.bytes().rev().take_while(|&b| b == b']').count();
    let depth = open.min(close);

    if body.len() < depth * 2 {
        return None;
    }

    Some((&body[depth..body.len() - depth], depth, comment))
}

/// `Some(None)` for an empty tail, `Some(Some(_))` for a comment tail, `None`
/// when the text cannot follow a header.
fn header_tail(tail: &str, options: &IniOptions) -> Option<Option<InlineComment>> {
    let tail = tail.trim_start();
    let mut chars = tail.chars();

    match chars.next() {
        None => Some(None),
        Some(delimiter @ ('#' | ';')) if options.inline_comments => Some(Some(InlineComment {
            delimiter,
            text: chars.as_str().to_string(),
        })),
        Some(_) => None,
    }
}

fn parse_assignment<'a>(line: &'a str, options: &IniOptions) -> Option<LineKind<'a>> {
    let (at, separator) = match line.find('=') {
        Some(at) => (at, '='),
        None if options.colon_separator => (line.find(':')?, ':'),
        None => return None,
    };

    let key = line[..at].trim();
    let rest = &line[at + 1..];

    let (value, comment) = match find_inline_comment(rest).filter(|_| options.inline_comments) {
        Some(start) => {
            let delimiter = if rest.as_bytes()[start] == b'#' { '#' } else { ';' };
            let comment = InlineComment {
                delimiter,
                text: rest[start + 1..].to_string(),
            };
            (&rest[..start], Some(comment))
        }
        None => (rest, None),
    };

    Some(LineKind::Assignment {
        key,
        separator,
        value: value.trim(),
        comment,
    })
}

/// Byte offset of a `;` or `#` that starts an inline comment.
///
/// The marker must follow whitespace and sit outside a quoted literal. A quote
/// only opens a literal at a token boundary, so apostrophes inside words do not.
fn find_inline_comment(value: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, ch) in value.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\''
                    if prev.map_or(true, |p| {
                        p.is_whitespace() || matches!(p, '[' | '(' | '{' | ',' | ':')
                    }) =>
                {
                    quote = Some(ch);
                }
                '#' | ';' if prev.is_some_and(char::is_whitespace) => return Some(i),
                _ => {}
            },
        }
        prev = Some(ch);
    }

    None
}
