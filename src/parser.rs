//! Single-pass INI parser.
//!
//! The parser walks physical lines once, joining continuation runs, and routes
//! each classified line into a [`Document`]. It never fails: lines that match
//! no rule are kept as [`Entry::Raw`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::parser::Parser;
//!
//! let doc = Parser::new("x = 1\n[a]\nkey = part1\\\npart2").parse();
//!
//! assert_eq!(doc.default_section().get("x").unwrap(), "1");
//! assert_eq!(doc.get_section("a").unwrap().get("key").unwrap(), "part1part2");
//! ```

use crate::document::{Entry, Pair};
use crate::line::{classify, strip_continuation, LineKind};
use crate::{Document, IniOptions};
use std::borrow::Cow;

/// Parses INI text into a [`Document`].
pub struct Parser<'a> {
    input: &'a str,
    options: IniOptions,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            options: IniOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(input: &'a str, options: IniOptions) -> Self {
        Parser { input, options }
    }

    /// Runs the parser.
    ///
    /// A header naming an existing section (exact match) reopens it, so its
    /// entries merge. Repeated keys overwrite the earlier value in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::parser::Parser;
    ///
    /// let doc = Parser::new("[a]\nx = 1\n[b]\n[a]\nx = 2\ny = 3").parse();
    ///
    /// let a = doc.get_section("a").unwrap();
    /// assert_eq!(a.iter().collect::<Vec<_>>(), vec![("x", "2"), ("y", "3")]);
    /// assert_eq!(doc.len(), 3);
    /// ```
    #[must_use]
    pub fn parse(&self) -> Document {
        let mut doc = Document::new();
        let mut current = 0;
        let mut lines = physical_lines(self.input).enumerate();

        while let Some((number, first)) = lines.next() {
            let line = self.join_continuation(first, lines.by_ref().map(|(_, l)| l));
            let kind = classify(&line, &self.options);
            log::trace!("line {}: {:?}", number + 1, kind);

            match kind {
                LineKind::SectionHeader {
                    name,
                    depth,
                    comment,
                } => {
                    current = doc.open_section(name, depth, comment);
                    log::debug!("section [{}] opened at line {}", name, number + 1);
                }
                LineKind::Assignment {
                    key,
                    separator,
                    value,
                    comment,
                } => doc.section_at_mut(current).upsert(Pair {
                    key: key.to_string(),
                    value: value.to_string(),
                    separator,
                    comment,
                }),
                LineKind::Comment { delimiter, text } => {
                    doc.section_at_mut(current).push(Entry::Comment {
                        delimiter,
                        text: text.to_string(),
                    })
                }
                LineKind::Blank => doc.section_at_mut(current).push(Entry::Blank),
                LineKind::Raw(text) => doc.section_at_mut(current).push(Entry::Raw(text.to_string())),
            }
        }

        log::debug!("parsed {} section(s)", doc.len());
        doc
    }

    /// Appends following lines while an assignment's value ends in `\`. A
    /// trailing backslash on the last line of input is dropped.
    fn join_continuation<I>(&self, line: &'a str, mut rest: I) -> Cow<'a, str>
    where
        I: Iterator<Item = &'a str>,
    {
        if !self.continues(line) {
            return Cow::Borrowed(line);
        }

        let mut joined = String::from(line);
        loop {
            joined.pop();
            match rest.next() {
                Some(next) => joined.push_str(next),
                None => break,
            }
            if !self.continues(&joined) {
                break;
            }
        }

        Cow::Owned(joined)
    }

    /// An assignment continues when its value, not its inline comment, ends
    /// in a backslash.
    fn continues(&self, line: &str) -> bool {
        self.options.line_continuation
            && strip_continuation(line).is_some()
            && matches!(
                classify(line, &self.options),
                LineKind::Assignment { comment: None, .. }
            )
    }
}

/// Splits on `\n` and trims trailing whitespace (`\r` included). Empty input
/// has no lines; a final newline yields a trailing empty line.
fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    (!input.is_empty())
        .then(|| input.split('\n'))
        .into_iter()
        .flatten()
        .map(str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InlineComment;

    #[test]
    fn test_physical_lines() {
        assert_eq!(physical_lines("").count(), 0);
        assert_eq!(physical_lines("a\r\nb  \n").collect::<Vec<_>>(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_comment_and_blank_preserved_in_default_section() {
        let doc = Parser::new("# hello\n\n[a]\nb=1\n").parse();

        assert_eq!(
            doc.default_section().entries(),
            &[
                Entry::Comment {
                    delimiter: '#',
                    text: " hello".to_string()
                },
                Entry::Blank
            ]
        );
        assert_eq!(doc.get_section("a").unwrap().get("b").unwrap(), "1");
    }

    #[test]
    fn test_continuation_only_for_assignments() {
        let doc = Parser::new("key = a\\\n  b\\\nc\n# note\\\nx = 1").parse();
        let section = doc.default_section();

        assert_eq!(section.get("key").unwrap(), "a  bc");
        assert_eq!(section.get("x").unwrap(), "1");
        assert_eq!(section.entries().len(), 3);
    }

    #[test]
    fn test_backslash_inside_inline_comment_does_not_continue() {
        let doc = Parser::new("a = 1 ; see \\\nb = 2").parse();
        let section = doc.default_section();

        assert_eq!(section.get("a").unwrap(), "1");
        assert_eq!(section.get("b").unwrap(), "2");
        assert_eq!(
            section.entries()[0].as_pair().unwrap().comment,
            Some(InlineComment {
                delimiter: ';',
                text: " see \\".to_string()
            })
        );
    }

    #[test]
    fn test_continuation_stops_at_commented_line() {
        let doc = Parser::new("a = x\\\n y ; note \\\nb = 2").parse();
        let section = doc.default_section();

        assert_eq!(section.get("a").unwrap(), "x y");
        assert_eq!(section.get("b").unwrap(), "2");
    }

    #[test]
    fn test_header_comment_kept() {
        let doc = Parser::new("[a] ; owner section\nx = 1").parse();
        let a = doc.get_section("a").unwrap();

        assert_eq!(a.comment().map(|c| c.text.as_str()), Some(" owner section"));
        assert_eq!(a.get("x").unwrap(), "1");
    }

    #[test]
    fn test_default_named_header_is_an_ordinary_section() {
        let doc = Parser::new("x = 1\n[__default__]\ny = 2").parse();

        assert_eq!(doc.len(), 2);
        assert!(!doc.default_section().contains_key("y"));
        let explicit = doc.sections().nth(1).unwrap();
        assert!(!explicit.is_default());
        assert_eq!(explicit.get("y").unwrap(), "2");
    }

    #[test]
    fn test_continuation_at_end_of_input() {
        let doc = Parser::new("key = tail\\").parse();
        assert_eq!(doc.default_section().get("key").unwrap(), "tail");
    }

    #[test]
    fn test_continuation_disabled() {
        let options = IniOptions::new().with_line_continuation(false);
        let doc = Parser::with_options("key = a\\\nb = 2", options).parse();

        assert_eq!(doc.default_section().get("key").unwrap(), "a\\");
        assert_eq!(doc.default_section().get("b").unwrap(), "2");
    }

    #[test]
    fn test_duplicate_key_replaces_layout() {
        let doc = Parser::new("a = 1\nb = 2\na: 3 ; last").parse();
        let section = doc.default_section();

        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        let first = section.entries()[0].as_pair().unwrap();
        assert_eq!(first.value, "3");
        assert_eq!(first.separator, ':');
        assert_eq!(
            first.comment,
            Some(InlineComment {
                delimiter: ';',
                text: " last".to_string()
            })
        );
    }

    #[test]
    fn test_header_depth_and_raw_lines() {
        let doc = Parser::new("[[outer]]\nnot a pair\n[broken").parse();
        let outer = doc.get_section("outer").unwrap();

        assert_eq!(outer.depth(), 2);
        assert_eq!(
            outer.entries(),
            &[
                Entry::Raw("not a pair".to_string()),
                Entry::Raw("[broken".to_string())
            ]
        );
    }
}
