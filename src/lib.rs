//! # serde_ini
//!
//! A layout-preserving reader and writer for INI configuration files, with
//! Serde support.
//!
//! ## Key Features
//!
//! - **Round-trips edits**: comments, blank lines, unparsed lines and ordering
//!   survive a parse/modify/write cycle
//! - **Total parsing**: any text parses; unrecognized lines are kept verbatim
//! - **Typed values**: a small literal grammar reads numbers, booleans, lists
//!   and maps out of raw values without evaluating expressions
//! - **Serde Compatible**: read and write `#[derive(Serialize, Deserialize)]`
//!   types, sections mapping to nested structs
//!
//! ## Quick Start
//!
//! ### Editing a file in place
//!
//! ```rust
//! use serde_ini::{dumps, loads};
//!
//! let text = "; service settings\n[server]\nport = 8080 ; default\nhost = 0.0.0.0";
//! let mut doc = loads(text);
//!
//! doc.get_section_mut("server").unwrap().set("port", "9090");
//!
//! assert_eq!(
//!     dumps(&doc),
//!     "; service settings\n[server]\nport = 9090 ; default\nhost = 0.0.0.0"
//! );
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ini::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Database {
//!     url: String,
//!     pool: u32,
//!     replicas: Vec<String>,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     database: Database,
//! }
//!
//! let config = Config {
//!     name: "api".to_string(),
//!     database: Database {
//!         url: "postgres://localhost/app".to_string(),
//!         pool: 8,
//!         replicas: vec!["r1".to_string(), "r2".to_string()],
//!     },
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(
//!     text,
//!     "name = api\n[database]\nurl = postgres://localhost/app\npool = 8\nreplicas = [\"r1\", \"r2\"]"
//! );
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(back, config);
//! ```
//!
//! ### The mapping view
//!
//! ```rust
//! use serde_ini::{loads_map, IniValue};
//!
//! let map = loads_map("verbose = true\n[limits]\nsizes = [1, 2, 3]");
//!
//! assert_eq!(map.get("verbose"), Some(&IniValue::Bool(true)));
//! let limits = map.get("limits").and_then(IniValue::as_map).unwrap();
//! assert_eq!(limits.get("sizes").and_then(IniValue::as_list).map(Vec::len), Some(3));
//! ```
//!
//! ## Logging
//!
//! The parser reports through the [`log`] facade: every classified line at
//! `trace`, opened sections at `debug`, and merged duplicate sections or
//! shadowed keys at `warn`. Install any logger to see them.
//!
//! ## Format
//!
//! See the [`format`] module for the accepted grammar.

pub mod coerce;
pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod line;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

pub use coerce::coerce;
pub use de::Deserializer;
pub use document::{Document, Entry, InlineComment, Pair, Section, DEFAULT_SECTION};
pub use error::{Error, Lookup, Result, StreamMode};
pub use map::IniMap;
pub use options::IniOptions;
pub use parser::Parser;
pub use ser::IniValueSerializer;
pub use value::{IniValue, Number};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Version of this crate, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses INI text into a [`Document`].
///
/// Parsing never fails; see the [`format`] module for how each line is read.
///
/// # Examples
///
/// ```rust
/// use serde_ini::loads;
///
/// let doc = loads("x=1\n[Owner]\nname = Ada");
///
/// assert_eq!(doc.default_section().get("x").unwrap(), "1");
/// assert_eq!(doc.get_section("owner").unwrap().get("name").unwrap(), "Ada");
/// ```
#[must_use]
pub fn loads(text: &str) -> Document {
    Parser::new(text).parse()
}

/// Parses INI text with custom options.
#[must_use]
pub fn loads_with_options(text: &str, options: &IniOptions) -> Document {
    Parser::with_options(text, options.clone()).parse()
}

/// Writes a [`Document`] as INI text.
#[must_use]
pub fn dumps(doc: &Document) -> String {
    ser::write_document(doc, &IniOptions::default())
}

/// Writes a [`Document`] as INI text with custom options.
#[must_use]
pub fn dumps_with_options(doc: &Document, options: &IniOptions) -> String {
    ser::write_document(doc, options)
}

/// Reads all text from `reader` and parses it.
///
/// # Examples
///
/// ```rust
/// use serde_ini::load;
/// use std::io::Cursor;
///
/// let doc = load(Cursor::new("[a]\nb = 1")).unwrap();
/// assert!(doc.contains_section("a"));
/// ```
///
/// # Errors
///
/// [`Error::InvalidStreamMode`] when the handle was not opened for reading,
/// [`Error::Io`] for other read failures, including input that is not UTF-8.
pub fn load<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::from_io(&e, StreamMode::Read))?;
    Ok(loads(&text))
}

/// Writes a document to `writer` and flushes it.
///
/// The writer is left open; pass `&mut file` to keep using it afterwards.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{dump, loads};
///
/// let doc = loads("[a]\nb = 1");
/// let mut buffer = Vec::new();
/// dump(&doc, &mut buffer).unwrap();
///
/// assert_eq!(buffer, b"[a]\nb = 1");
/// ```
///
/// # Errors
///
/// [`Error::InvalidStreamMode`] when the handle was not opened for writing,
/// [`Error::ClosedResource`] when the other end is gone, [`Error::Io`] for
/// anything else.
pub fn dump<W>(doc: &Document, mut writer: W) -> Result<()>
where
    W: io::Write,
{
    let text = dumps(doc);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::from_io(&e, StreamMode::Write))
}

/// Parses INI text straight into the mapping view.
///
/// Default-section keys become top-level values and each section a nested
/// map. Layout is discarded.
#[must_use]
pub fn loads_map(text: &str) -> IniMap {
    loads(text).to_map()
}

/// Writes the mapping view as INI text.
///
/// Top-level plain values are written first, then one section per nested map,
/// all in canonical literal form.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{dumps_map, loads_map};
///
/// let map = loads_map("[s]\nratio = 2.50\n\n; gone\nname = x");
/// assert_eq!(dumps_map(&map), "[s]\nratio = 2.5\nname = x");
/// ```
#[must_use]
pub fn dumps_map(map: &IniMap) -> String {
    Document::from(map).to_string()
}

/// Serializes any `T: Serialize` to INI text.
///
/// `T` must serialize as a map or struct. Plain fields go before the first
/// header; fields holding maps or structs become sections.
///
/// # Errors
///
/// [`Error::InvalidSubscriptType`] when `T` is not map-shaped or has non-string
/// keys.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &IniOptions::default())
}

/// Serializes any `T: Serialize` to INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{to_string_with_options, IniOptions};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("key", "value");
///
/// let options = IniOptions::new().with_spaced_separator(false);
/// assert_eq!(to_string_with_options(&map, &options).unwrap(), "key=value");
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
pub fn to_string_with_options<T>(value: &T, options: &IniOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let map = ser::to_ini_map(value)?;
    Ok(Document::from(&map).to_string_with_options(options))
}

/// Serializes any `T: Serialize` as INI text into `writer`.
///
/// # Errors
///
/// Serialization errors as for [`to_string`], I/O errors as for [`dump`].
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let map = ser::to_ini_map(value)?;
    dump(&Document::from(&map), writer)
}

/// Converts any `T: Serialize` to an [`IniValue`].
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_value;
///
/// let value = to_value(&(1, "two")).unwrap();
/// assert_eq!(value.to_string(), "[1, \"two\"]");
/// ```
///
/// # Errors
///
/// Fails on map keys that are not strings.
pub fn to_value<T>(value: &T) -> Result<IniValue>
where
    T: ?Sized + Serialize,
{
    ser::to_ini_value(value)
}

/// Deserializes `T` from INI text through the mapping view.
///
/// # Errors
///
/// [`Error::TypeMismatch`] and serde's own errors when the file does not fit
/// `T`.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s))
}

/// Deserializes `T` from an I/O stream of INI text.
///
/// # Errors
///
/// Read errors as for [`load`], conversion errors as for [`from_str`].
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let doc = load(reader)?;
    T::deserialize(Deserializer::from_document(&doc))
}

/// Converts an [`IniValue`] into `T`.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{coerce, from_value};
///
/// let pair: (u8, String) = from_value(coerce("(7, 'seven')")).unwrap();
/// assert_eq!(pair, (7, "seven".to_string()));
/// ```
///
/// # Errors
///
/// When the value does not fit `T`.
pub fn from_value<'de, T>(value: IniValue) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(value))
}
