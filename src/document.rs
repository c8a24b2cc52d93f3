//! The layout-preserving document model.
//!
//! A [`Document`] is an ordered list of [`Section`]s. The first one is always
//! the implicit default section ([`DEFAULT_SECTION`]) that holds everything
//! before the first header. Each section is an ordered list of [`Entry`]s:
//! key/value pairs plus the comments, blank lines and unparsed lines around
//! them, so writing a parsed document gives back the original layout.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{loads, IniValue};
//!
//! let mut doc = loads("# service config\n[Server]\nport = 8080\n");
//!
//! // Section lookup ignores case
//! let server = doc.get_section_mut("server").unwrap();
//! assert_eq!(server.get_value("port").unwrap(), IniValue::from(8080));
//!
//! server.set("host", "localhost");
//! assert_eq!(
//!     doc.to_string(),
//!     "# service config\n[Server]\nport = 8080\n\nhost = localhost"
//! );
//! ```
//!
//! Note the trailing blank line of the input stays where it was; new keys go
//! after it.

use crate::error::{Error, Result};
use crate::{coerce, IniMap, IniOptions, IniValue};
use std::fmt;

/// Name of the implicit section holding entries that precede any header.
pub const DEFAULT_SECTION: &str = "__default__";

/// A trailing `; comment` or `# comment` on an assignment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineComment {
    pub delimiter: char,
    /// Everything after the delimiter
    pub text: String,
}

/// A key/value assignment. The value is kept as raw text; see
/// [`Section::get_value`] for the typed view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// `=` or `:`, as written
    pub separator: char,
    pub comment: Option<InlineComment>,
}

impl Pair {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Pair {
            key: key.into(),
            value: value.into(),
            separator: '=',
            comment: None,
        }
    }
}

/// One line's contribution to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Pair(Pair),
    Blank,
    Comment { delimiter: char, text: String },
    /// A line that matched no rule, kept verbatim
    Raw(String),
}

impl Entry {
    #[must_use]
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Entry::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    /// Returns `true` for comments, blank lines and raw lines.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        !matches!(self, Entry::Pair(_))
    }
}

/// A named, ordered group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    // 0 only for the implicit default section
    depth: usize,
    comment: Option<InlineComment>,
    entries: Vec<Entry>,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>, depth: usize) -> Self {
        Section {
            name: name.into(),
            depth,
            comment: None,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of brackets around the header: 1 for `[a]`, 2 for `[[a]]`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` for the implicit section before the first header. A
    /// header spelled `[__default__]` still opens an ordinary section.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.depth == 0
    }

    /// The inline comment written after the header, as in `[a] ; note`.
    #[must_use]
    pub fn comment(&self) -> Option<&InlineComment> {
        self.comment.as_ref()
    }

    /// Replaces the header comment. Ignored when writing the default section,
    /// which has no header line.
    pub fn set_comment(&mut self, comment: Option<InlineComment>) {
        self.comment = comment;
    }

    /// All entries, layout included, in line order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| matches!(entry, Entry::Pair(pair) if pair.key == key))
    }

    fn pair_mut(&mut self, key: &str) -> Option<&mut Pair> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Pair(pair) if pair.key == key => Some(pair),
            _ => None,
        })
    }

    /// Sets the raw value of `key`.
    ///
    /// The first entry with that key is updated in place, keeping its inline
    /// comment; otherwise a new pair is appended.
    ///
    /// The text is written verbatim. A value containing ` ;` or ` #`, or
    /// ending in `\`, reads back differently (as an inline comment or a
    /// continuation). Use [`Section::set_value`] for arbitrary strings; it
    /// quotes them when needed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::loads;
    ///
    /// let mut doc = loads("a = 1 ; keep me\nb = 2");
    /// doc.default_section_mut().set("a", "10");
    /// doc.default_section_mut().set("c", "3");
    ///
    /// assert_eq!(doc.to_string(), "a = 10 ; keep me\nb = 2\nc = 3");
    /// ```
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pair_mut(key) {
            Some(pair) => pair.value = value,
            None => self.entries.push(Entry::Pair(Pair::new(key, value))),
        }
    }

    /// Sets `key` to the canonical text of a typed value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{Document, IniValue};
    ///
    /// let mut doc = Document::new();
    /// let section = doc.create_section("limits").unwrap();
    /// section.set_value("max", 10);
    /// section.set_value("label", "10");
    ///
    /// assert_eq!(section.get_value("max").unwrap(), IniValue::from(10));
    /// assert_eq!(section.get_value("label").unwrap(), IniValue::from("10"));
    /// ```
    pub fn set_value(&mut self, key: &str, value: impl Into<IniValue>) {
        self.set(key, value.into().to_string());
    }

    /// Replaces the first pair with the same key, layout metadata included,
    /// or appends it.
    pub(crate) fn upsert(&mut self, pair: Pair) {
        match self.pair_mut(&pair.key) {
            Some(existing) => *existing = pair,
            None => self.entries.push(Entry::Pair(pair)),
        }
    }

    /// Raw text of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the section has no such key.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                Entry::Pair(pair) if pair.key == key => Some(pair.value.as_str()),
                _ => None,
            })
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Coerced value of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the section has no such key.
    pub fn get_value(&self, key: &str) -> Result<IniValue> {
        self.get(key).map(coerce)
    }

    /// Removes `key` and returns its raw value.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the section has no such key.
    pub fn delete(&mut self, key: &str) -> Result<String> {
        let index = self.position(key).ok_or_else(|| Error::key_not_found(key))?;
        match self.entries.remove(index) {
            Entry::Pair(pair) => Ok(pair.value),
            _ => Err(Error::key_not_found(key)),
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn append_blank(&mut self) {
        self.entries.push(Entry::Blank);
    }

    /// Appends a `#` comment. `text` is written right after the delimiter.
    pub fn append_comment(&mut self, text: impl Into<String>) {
        self.append_comment_with('#', text);
    }

    /// Appends a comment with an explicit delimiter, normally `#` or `;`.
    pub fn append_comment_with(&mut self, delimiter: char, text: impl Into<String>) {
        self.entries.push(Entry::Comment {
            delimiter,
            text: text.into(),
        });
    }

    pub fn append_raw(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Raw(text.into()));
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Iterates over key/value pairs only, in insertion order.
    pub fn iter(&self) -> Pairs<'_> {
        Pairs {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Number of key/value pairs; layout entries are not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the section holds no key/value pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Coerced key/values of this section.
    #[must_use]
    pub fn to_map(&self) -> IniMap {
        self.iter()
            .map(|(key, value)| (key.to_string(), coerce(value)))
            .collect()
    }
}

/// Iterator over the key/value pairs of a [`Section`].
pub struct Pairs<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|entry| match entry {
            Entry::Pair(pair) => Some((pair.key.as_str(), pair.value.as_str())),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a str, &'a str);
    type IntoIter = Pairs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A parsed INI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    // Never empty: index 0 is the default section.
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only the empty default section.
    #[must_use]
    pub fn new() -> Self {
        Document {
            sections: vec![Section::new(DEFAULT_SECTION, 0)],
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.sections
            .iter()
            .position(|section| section.name.to_lowercase() == wanted)
    }

    /// Appends a new, empty section.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateSection`] when a section with exactly this name
    /// exists. The check is case-sensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{Document, Error};
    ///
    /// let mut doc = Document::new();
    /// doc.create_section("Owner").unwrap();
    ///
    /// assert!(matches!(doc.create_section("Owner"), Err(Error::DuplicateSection(_))));
    /// assert_eq!(doc.get_section("owner").unwrap().name(), "Owner");
    /// ```
    pub fn create_section(&mut self, name: &str) -> Result<&mut Section> {
        if self.sections.iter().any(|section| section.name == name) {
            return Err(Error::duplicate_section(name));
        }

        let index = self.sections.len();
        self.sections.push(Section::new(name, 1));
        Ok(&mut self.sections[index])
    }

    /// Selects the explicit section named exactly `name`, appending it when
    /// missing. Returns its index. The default section is never reopened, and
    /// a merged header keeps the first header's comment.
    pub(crate) fn open_section(
        &mut self,
        name: &str,
        depth: usize,
        comment: Option<InlineComment>,
    ) -> usize {
        let existing = self
            .sections
            .iter()
            .skip(1)
            .position(|s| s.name == name)
            .map(|index| index + 1);

        if let Some(index) = existing {
            log::warn!("section [{}] appears more than once, merging entries", name);
            return index;
        }

        let mut section = Section::new(name, depth);
        section.comment = comment;
        self.sections.push(section);
        self.sections.len() - 1
    }

    pub(crate) fn section_at_mut(&mut self, index: usize) -> &mut Section {
        &mut self.sections[index]
    }

    /// Looks a section up by name, ignoring case.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no section matches.
    pub fn get_section(&self, name: &str) -> Result<&Section> {
        self.position(name)
            .map(|index| &self.sections[index])
            .ok_or_else(|| Error::section_not_found(name))
    }

    /// Mutable variant of [`Document::get_section`].
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no section matches.
    pub fn get_section_mut(&mut self, name: &str) -> Result<&mut Section> {
        match self.position(name) {
            Some(index) => Ok(&mut self.sections[index]),
            None => Err(Error::section_not_found(name)),
        }
    }

    /// Removes a section, looked up ignoring case, and returns it.
    ///
    /// The default section cannot go away; deleting it returns its entries and
    /// leaves it empty.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no section matches.
    pub fn delete_section(&mut self, name: &str) -> Result<Section> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::section_not_found(name))?;

        if index == 0 {
            return Ok(std::mem::replace(
                &mut self.sections[0],
                Section::new(DEFAULT_SECTION, 0),
            ));
        }
        Ok(self.sections.remove(index))
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn default_section(&self) -> &Section {
        &self.sections[0]
    }

    pub fn default_section_mut(&mut self) -> &mut Section {
        &mut self.sections[0]
    }

    /// All sections, the default one first.
    pub fn sections(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.iter().map(Section::name)
    }

    /// Number of sections, counting the default one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` when there are no explicit sections and no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.len() == 1 && self.sections[0].entries.is_empty()
    }

    /// Flattens the document into the nested-mapping view.
    ///
    /// Default-section keys become top-level values; every other section
    /// becomes a nested [`IniValue::Map`]. Keys and sections share one
    /// namespace, so a section named like a top-level key replaces it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{loads, IniValue};
    ///
    /// let map = loads("x = 1\n[a]\nb = [1, 2]").to_map();
    ///
    /// assert_eq!(map.get("x"), Some(&IniValue::from(1)));
    /// let a = map.get("a").and_then(IniValue::as_map).unwrap();
    /// assert!(a.get("b").unwrap().is_list());
    /// ```
    #[must_use]
    pub fn to_map(&self) -> IniMap {
        let mut map = self.default_section().to_map();

        for section in self.sections.iter().skip(1) {
            let previous = map.insert(section.name.clone(), IniValue::Map(section.to_map()));
            if previous.is_some() {
                log::warn!(
                    "section [{}] shadows a top-level key of the same name",
                    section.name
                );
            }
        }

        map
    }

    /// Writes the document as INI text with explicit options.
    #[must_use]
    pub fn to_string_with_options(&self, options: &IniOptions) -> String {
        crate::ser::write_document(self, options)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::write_document(self, &IniOptions::default()))
    }
}

/// Builds a document from the nested-mapping view.
///
/// Plain values go to the default section and map values become sections, in
/// map order. Values are stored in their canonical text form.
impl From<&IniMap> for Document {
    fn from(map: &IniMap) -> Self {
        let mut doc = Document::new();

        for (key, value) in map.iter().filter(|(_, v)| !v.is_map()) {
            doc.default_section_mut().set_value(key, value.clone());
        }

        for (name, value) in map.iter() {
            if let IniValue::Map(entries) = value {
                let index = doc.open_section(name, 1, None);
                let section = doc.section_at_mut(index);
                for (key, value) in entries.iter() {
                    section.set_value(key, value.clone());
                }
            }
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_default_section() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert!(doc.default_section().is_default());
        assert_eq!(doc.get_section("__DEFAULT__").unwrap().name(), DEFAULT_SECTION);
    }

    #[test]
    fn test_duplicate_is_case_sensitive() {
        let mut doc = Document::new();
        doc.create_section("a").unwrap();
        assert_eq!(
            doc.create_section("a").unwrap_err(),
            Error::duplicate_section("a")
        );
        assert!(doc.create_section("A").is_ok());
        assert_eq!(
            doc.create_section(DEFAULT_SECTION).unwrap_err(),
            Error::duplicate_section(DEFAULT_SECTION)
        );
    }

    #[test]
    fn test_section_set_get_delete() {
        let mut section = Section::new("s", 1);
        section.set("a", "1");
        section.append_blank();
        section.set("b", "2");
        section.set("a", "3");

        assert_eq!(section.get("a").unwrap(), "3");
        assert_eq!(section.len(), 2);
        assert_eq!(section.entries().len(), 3);
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["a", "b"]);

        assert_eq!(section.delete("a").unwrap(), "3");
        assert_eq!(section.delete("a").unwrap_err(), Error::key_not_found("a"));
        assert_eq!(section.get("missing").unwrap_err(), Error::key_not_found("missing"));
    }

    #[test]
    fn test_iteration_skips_layout() {
        let mut section = Section::new("s", 1);
        section.append_comment("intro");
        section.set("x", "1");
        section.append_raw("garbage");
        section.set("y", "2");
        section.append_blank();

        let pairs: Vec<_> = (&section).into_iter().collect();
        assert_eq!(pairs, vec![("x", "1"), ("y", "2")]);
        assert!(!section.is_empty());
    }

    #[test]
    fn test_delete_section() {
        let mut doc = Document::new();
        doc.create_section("Owner").unwrap().set("name", "me");

        let removed = doc.delete_section("OWNER").unwrap();
        assert_eq!(removed.get("name").unwrap(), "me");
        assert!(!doc.contains_section("owner"));
        assert_eq!(
            doc.delete_section("owner").unwrap_err(),
            Error::section_not_found("owner")
        );
    }

    #[test]
    fn test_delete_default_section_clears_it() {
        let mut doc = Document::new();
        doc.default_section_mut().set("x", "1");

        let old = doc.delete_section(DEFAULT_SECTION).unwrap();
        assert_eq!(old.len(), 1);
        assert!(doc.default_section().is_empty());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_map_roundtrip_puts_defaults_first() {
        let mut map = IniMap::new();
        let mut section = IniMap::new();
        section.insert("port".to_string(), IniValue::from(80));
        map.insert("server".to_string(), IniValue::Map(section));
        map.insert("debug".to_string(), IniValue::from(true));

        let doc = Document::from(&map);
        assert_eq!(doc.to_string(), "debug = true\n[server]\nport = 80");

        let back = doc.to_map();
        assert_eq!(back.get("debug"), map.get("debug"));
        assert_eq!(back.get("server"), map.get("server"));
    }

    #[test]
    fn test_set_value_survives_round_trip_where_set_does_not() {
        let tricky = ["a ; b", "c # d", "dir\\"];

        let mut doc = Document::new();
        for (i, text) in tricky.iter().enumerate() {
            doc.default_section_mut().set_value(&format!("k{}", i), *text);
        }
        let back = crate::loads(&doc.to_string());
        for (i, text) in tricky.iter().enumerate() {
            assert_eq!(
                back.default_section().get_value(&format!("k{}", i)).unwrap(),
                IniValue::from(*text)
            );
        }

        let mut raw = Document::new();
        raw.default_section_mut().set("k", "a ; b");
        let back = crate::loads(&raw.to_string());
        assert_eq!(back.default_section().get("k").unwrap(), "a");
    }

    #[test]
    fn test_header_comment_written_after_header() {
        let mut doc = Document::new();
        let section = doc.create_section("owner").unwrap();
        section.set_comment(Some(InlineComment {
            delimiter: ';',
            text: " who to blame".to_string(),
        }));
        section.set("name", "me");

        assert_eq!(doc.to_string(), "[owner] ; who to blame\nname = me");
        doc.default_section_mut().set_comment(Some(InlineComment {
            delimiter: '#',
            text: "dropped".to_string(),
        }));
        assert_eq!(doc.to_string(), "[owner] ; who to blame\nname = me");
    }

    #[test]
    fn test_open_section_never_reopens_default() {
        let mut doc = Document::new();
        let index = doc.open_section(DEFAULT_SECTION, 1, None);

        assert_eq!(index, 1);
        assert!(doc.default_section().is_default());
        assert!(!doc.sections().nth(1).unwrap().is_default());
        assert_eq!(doc.open_section(DEFAULT_SECTION, 1, None), 1);
    }
}
