//! INI format reference
//!
//! This module documents the dialect read and written by this library. It
//! contains no code.
//!
//! # Lines
//!
//! A file is a sequence of lines separated by `\n`. Trailing whitespace on
//! each line (including a `\r` from CRLF files) is ignored. Each line is
//! classified by the first rule that matches:
//!
//! | Kind | Rule | Example |
//! |------|------|---------|
//! | Section header | first non-blank character is `[` and a `]` closes it | `[server]` |
//! | Comment | first non-blank character is `#` or `;` | `; note` |
//! | Assignment | contains `=`, or `:` when there is no `=` | `port = 8080` |
//! | Blank | whitespace only | |
//! | Raw | anything else | `just some words` |
//!
//! Nothing is ever rejected. A line that fits no rule, or a header with no
//! closing bracket, is kept verbatim as a raw line and written back as is.
//!
//! ## Section headers
//!
//! ```text
//! [server]
//! [[server.tls]]
//! [owner] ; trailing comments are allowed
//! ```
//!
//! The depth of a header is the smaller of its leading `[` run and trailing
//! `]` run, and the name is what lies between. Depth is remembered and
//! written back but carries no nesting meaning.
//!
//! Everything before the first header belongs to the implicit default
//! section, named `__default__`. It is never written as a header. A header
//! literally spelled `[__default__]` opens an ordinary section of that name.
//!
//! The header ends at the first `]` that is followed by nothing but
//! whitespace or an inline comment; the comment is kept and written back.
//!
//! Section names are looked up ignoring case, so `[Owner]` is found as
//! `owner`. A header repeating an existing name exactly reopens that section
//! and later entries merge into it.
//!
//! ## Assignments
//!
//! ```text
//! name = value
//! name: value
//! url = http://example.com:8080/
//! ```
//!
//! The key is everything before the first `=`; only lines without any `=` fall
//! back to splitting at the first `:`. Key and value are trimmed. Keys are case
//! sensitive. Assigning an existing key again replaces its value where it
//! first appeared.
//!
//! ## Inline comments
//!
//! A `;` or `#` that follows whitespace starts a comment running to the end of
//! the line, unless it sits inside a quoted literal:
//!
//! ```text
//! timeout = 30 ; seconds      -> "30"
//! color=#ff0000               -> "#ff0000"
//! title = "a ; b" # quoted    -> "\"a ; b\""
//! ```
//!
//! ## Continuation lines
//!
//! An assignment ending in `\` continues on the next line. The backslash is
//! removed and the next line is appended exactly as written, without a
//! separator:
//!
//! ```text
//! command = run --fast \
//!  --quiet
//! ```
//!
//! reads as `command = run --fast  --quiet`. Comments and other lines never
//! continue, and neither does an assignment whose backslash sits inside its
//! inline comment (`a = 1 ; see \`).
//!
//! Each grammar rule except headers and plain comments can be switched off
//! through [`IniOptions`](crate::IniOptions).
//!
//! # Values
//!
//! Values are stored as raw text. The typed view applies
//! [`coerce`](crate::coerce), a small literal grammar:
//!
//! ```text
//! literal  := null | bool | number | string | list | tuple | map
//! null     := "null" | "none"                      (any ASCII case)
//! bool     := "true" | "false"                     (any ASCII case)
//! number   := integer | float
//! string   := '"' chars '"' | "'" chars "'"        (backslash escapes)
//! list     := "[" (literal ("," literal)* ","?)? "]"
//! tuple    := "(" ... ")"                          (read as a list)
//! map      := "{" (string ":" literal ("," string ":" literal)* ","?)? "}"
//! ```
//!
//! Text that is not exactly one literal stays a string, unchanged. Integers
//! beyond the 64-bit range become big integers.
//!
//! Written values use the canonical form produced by `IniValue`'s `Display`.
//! Strings are left bare when reading them back gives the same string and
//! quoted otherwise:
//!
//! ```text
//! name = Alice
//! count = 3
//! label = "3"
//! flags = [true, "x y", null]
//! ```
//!
//! # Writing
//!
//! A document is written entry by entry in its original order. Headers,
//! comments, blank lines and raw lines are reproduced. Assignments are
//! normalized to `key = value` (`key: value` for colon lines), or `key=value`
//! without padding. Lines are joined with `\n` and the output ends without a
//! newline unless the input had a trailing blank line.
//!
//! Leading indentation is dropped from headers, comments and assignments, and
//! the gap before an inline comment becomes a single space:
//!
//! ```text
//!   [a]   ; x        ->  [a] ; x
//!     # note         ->  # note
//!   key=1   # c      ->  key = 1 # c
//! ```
//!
//! Raw lines are the exception and keep their indentation, since they are
//! written byte for byte.
//!
//! The mapping view is written with all top-level values first, followed by
//! one section per nested map. It carries no comments or blank lines.
