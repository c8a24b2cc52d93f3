//! Options for reading and writing INI text.
//!
//! [`IniOptions`] switches individual grammar rules on or off when parsing, and
//! controls spacing when writing.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{loads_with_options, IniOptions};
//!
//! // Only `=` separates keys from values
//! let options = IniOptions::new().with_colon_separator(false);
//! let doc = loads_with_options("url: http://example.com", &options);
//!
//! assert!(doc.default_section().is_empty());
//! ```

/// Parser and writer configuration.
///
/// # Examples
///
/// ```rust
/// use serde_ini::IniOptions;
///
/// let options = IniOptions::new()
///     .with_inline_comments(false)
///     .with_spaced_separator(false);
///
/// assert!(options.colon_separator);
/// assert!(!options.inline_comments);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniOptions {
    /// Accept `:` as a key/value separator when a line has no `=`
    pub colon_separator: bool,
    /// Split `value ; comment` into a value and an inline comment
    pub inline_comments: bool,
    /// Join assignments ending in `\` with the following line
    pub line_continuation: bool,
    /// Write `key = value` rather than `key=value`
    pub spaced_separator: bool,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            colon_separator: true,
            inline_comments: true,
            line_continuation: true,
            spaced_separator: true,
        }
    }
}

impl IniOptions {
    /// Creates default options: every grammar rule enabled, spaced separators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_colon_separator(mut self, enabled: bool) -> Self {
        self.colon_separator = enabled;
        self
    }

    #[must_use]
    pub fn with_inline_comments(mut self, enabled: bool) -> Self {
        self.inline_comments = enabled;
        self
    }

    #[must_use]
    pub fn with_line_continuation(mut self, enabled: bool) -> Self {
        self.line_continuation = enabled;
        self
    }

    /// Sets whether the separator is padded with spaces on output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{loads, IniOptions};
    ///
    /// let doc = loads("[a]\nkey = value");
    /// let compact = doc.to_string_with_options(&IniOptions::new().with_spaced_separator(false));
    /// assert_eq!(compact, "[a]\nkey=value");
    /// ```
    #[must_use]
    pub fn with_spaced_separator(mut self, enabled: bool) -> Self {
        self.spaced_separator = enabled;
        self
    }
}
