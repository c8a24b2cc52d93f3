//! Value coercion: raw INI text to [`IniValue`].
//!
//! Values are read with a fixed literal grammar, never an expression evaluator:
//!
//! | Input | Result |
//! |-------|--------|
//! | `42`, `-7`, `+3` | integer (big integer past `i64`) |
//! | `3.14`, `.5`, `1e-3` | float |
//! | `true`, `False` | boolean (any ASCII case) |
//! | `null`, `None` | null (any ASCII case) |
//! | `"a\tb"`, `'x'` | string with escapes |
//! | `[1, 2]`, `(1, 2)` | list |
//! | `{"k": 1}` | map (keys must be quoted) |
//! | anything else | the input, unchanged, as a string |
//!
//! Coercion is total. Text that only looks like a literal falls back to a string:
//!
//! ```rust
//! use serde_ini::{coerce, IniValue};
//!
//! let list = IniValue::List(vec![IniValue::from(1), IniValue::from(2), IniValue::from(3)]);
//! assert_eq!(coerce("[1, 2, 3]"), list);
//! assert_eq!(coerce("[1, 2"), IniValue::from("[1, 2"));
//! assert_eq!(coerce("[a, b]"), IniValue::from("[a, b]"));
//! ```

use crate::{IniMap, IniValue, Number};
use num_bigint::BigInt;

// Deeper nesting is treated as text instead of recursing further.
const MAX_DEPTH: usize = 64;

/// Interprets `raw` as a literal, falling back to the original string.
///
/// Surrounding whitespace is ignored while parsing, but the fallback string is
/// `raw` exactly as given.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{coerce, IniValue, Number};
///
/// assert_eq!(coerce("42"), IniValue::Number(Number::Integer(42)));
/// assert_eq!(coerce("3.14"), IniValue::Number(Number::Float(3.14)));
/// assert_eq!(coerce("true"), IniValue::Bool(true));
/// assert_eq!(coerce("hello"), IniValue::String("hello".to_string()));
/// ```
#[must_use]
pub fn coerce(raw: &str) -> IniValue {
    let mut parser = LiteralParser::new(raw.trim());
    match parser.parse_literal() {
        Some(value) if parser.at_end() => value,
        _ => IniValue::String(raw.to_string()),
    }
}

/// Recursive-descent reader over a single trimmed value.
///
/// Every method returns `None` on the first character that does not fit the
/// grammar; the caller then falls back to the raw string.
struct LiteralParser<'a> {
    input: &'a str,
    position: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        LiteralParser {
            input,
            position: 0,
            depth: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn parse_literal(&mut self) -> Option<IniValue> {
        self.skip_whitespace();
        match self.peek_char()? {
            '"' | '\'' => self.parse_string().map(IniValue::String),
            '[' => self.nested(|p| p.parse_list()),
            '(' => self.nested(|p| p.parse_tuple()),
            '{' => self.nested(|p| p.parse_map()),
            ch if ch.is_ascii_digit() || ch == '+' || ch == '-' || ch == '.' => {
                self.parse_number()
            }
            ch if ch.is_ascii_alphabetic() => self.parse_keyword(),
            _ => None,
        }
    }

    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Option<IniValue>) -> Option<IniValue> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_keyword(&mut self) -> Option<IniValue> {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.next_char();
            } else {
                break;
            }
        }

        let word = &self.input[start..self.position];
        if word.eq_ignore_ascii_case("true") {
            Some(IniValue::Bool(true))
        } else if word.eq_ignore_ascii_case("false") {
            Some(IniValue::Bool(false))
        } else if word.eq_ignore_ascii_case("null") || word.eq_ignore_ascii_case("none") {
            Some(IniValue::Null)
        } else {
            None
        }
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.next_char();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    fn parse_number(&mut self) -> Option<IniValue> {
        let start = self.position;
        if !self.eat('-') {
            self.eat('+');
        }

        let mut digits = self.consume_digits();
        let mut is_float = false;

        if self.eat('.') {
            is_float = true;
            digits += self.consume_digits();
        }

        if digits == 0 {
            return None;
        }

        // Exponent only counts when followed by digits
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let checkpoint = self.position;
            self.next_char();
            if !self.eat('-') {
                self.eat('+');
            }
            if self.consume_digits() > 0 {
                is_float = true;
            } else {
                self.position = checkpoint;
            }
        }

        let text = &self.input[start..self.position];
        if is_float {
            let value = text.parse::<f64>().ok()?;
            return value
                .is_finite()
                .then_some(IniValue::Number(Number::Float(value)));
        }

        let text = text.strip_prefix('+').unwrap_or(text);
        match text.parse::<i64>() {
            Ok(i) => Some(IniValue::Number(Number::Integer(i))),
            Err(_) => text.parse::<BigInt>().ok().map(IniValue::BigInt),
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.next_char()?;
        let mut result = String::new();

        loop {
            match self.next_char()? {
                ch if ch == quote => return Some(result),
                '\\' => match self.next_char()? {
                    '\\' => result.push('\\'),
                    '"' => result.push('"'),
                    '\'' => result.push('\''),
                    'n' => result.push('\n'),
                    'r' => result.push('\r'),
                    't' => result.push('\t'),
                    '0' => result.push('\0'),
                    // Unknown escapes are kept as written
                    other => {
                        result.push('\\');
                        result.push(other);
                    }
                },
                ch => result.push(ch),
            }
        }
    }

    /// Parses comma-separated literals up to `close`, after the opener.
    /// Returns the items and whether any comma was seen.
    fn parse_items(&mut self, close: char) -> Option<(Vec<IniValue>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;

        self.skip_whitespace();
        if self.eat(close) {
            return Some((items, saw_comma));
        }

        loop {
            items.push(self.parse_literal()?);
            self.skip_whitespace();
            match self.next_char()? {
                ',' => {
                    saw_comma = true;
                    self.skip_whitespace();
                    if self.eat(close) {
                        return Some((items, saw_comma));
                    }
                }
                ch if ch == close => return Some((items, saw_comma)),
                _ => return None,
            }
        }
    }

    fn parse_list(&mut self) -> Option<IniValue> {
        self.next_char();
        let (items, _) = self.parse_items(']')?;
        Some(IniValue::List(items))
    }

    fn parse_tuple(&mut self) -> Option<IniValue> {
        self.next_char();
        let (mut items, saw_comma) = self.parse_items(')')?;

        // `(x)` is just a parenthesised literal
        if items.len() == 1 && !saw_comma {
            return items.pop();
        }
        Some(IniValue::List(items))
    }

    fn parse_map(&mut self) -> Option<IniValue> {
        self.next_char();
        let mut map = IniMap::new();

        self.skip_whitespace();
        if self.eat('}') {
            return Some(IniValue::Map(map));
        }

        loop {
            self.skip_whitespace();
            if !matches!(self.peek_char(), Some('"' | '\'')) {
                return None;
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if !self.eat(':') {
                return None;
            }

            let value = self.parse_literal()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.next_char()? {
                ',' => {
                    self.skip_whitespace();
                    if self.eat('}') {
                        return Some(IniValue::Map(map));
                    }
                }
                '}' => return Some(IniValue::Map(map)),
                _ => return None,
            }
        }
    }
}
