//! Error types for INI documents, I/O and Serde conversion.
//!
//! Parsing and value coercion are total: any text produces a [`Document`](crate::Document)
//! and any raw value produces an [`IniValue`](crate::IniValue). Errors only come from
//!
//! - **Lookups and edits**: missing sections or keys, duplicate sections
//! - **Streams**: readers or writers in the wrong mode, closed resources
//! - **Serde**: values whose shape does not fit the target type
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{loads, Error};
//!
//! let doc = loads("[server]\nport = 8080");
//! let err = doc.get_section("server").unwrap().get("host").unwrap_err();
//!
//! assert!(matches!(err, Error::NotFound { .. }));
//! assert_eq!(err.to_string(), "key \"host\" not found");
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// What kind of item a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Section,
    Key,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Section => f.write_str("section"),
            Lookup::Key => f.write_str("key"),
        }
    }
}

/// The direction an I/O resource was expected to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    Read,
    Write,
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamMode::Read => f.write_str("reading"),
            StreamMode::Write => f.write_str("writing"),
        }
    }
}

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A key of the wrong type was used where a string key is required
    #[error("invalid subscript type: {0}")]
    InvalidSubscriptType(String),

    /// Lookup or deletion of a section or key that does not exist
    #[error("{kind} {name:?} not found")]
    NotFound { kind: Lookup, name: String },

    /// Creation of a section whose name is already taken
    #[error("cannot create existing section {0:?}")]
    DuplicateSection(String),

    /// The stream does not support the direction the operation needs
    #[error("stream is not open for {expected}")]
    InvalidStreamMode { expected: StreamMode },

    /// Write attempted on a resource that is already closed
    #[error("cannot write to closed resource")]
    ClosedResource,

    /// Any other I/O failure
    #[error("IO error: {0}")]
    Io(String),

    /// Type mismatch while deserializing a value
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A Rust type that has no INI representation
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through Serde
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a [`Error::NotFound`] for a missing section.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::section_not_found("owner");
    /// assert_eq!(err.to_string(), "section \"owner\" not found");
    /// ```
    pub fn section_not_found(name: &str) -> Self {
        Error::NotFound {
            kind: Lookup::Section,
            name: name.to_string(),
        }
    }

    /// Creates a [`Error::NotFound`] for a missing key.
    pub fn key_not_found(name: &str) -> Self {
        Error::NotFound {
            kind: Lookup::Key,
            name: name.to_string(),
        }
    }

    /// Creates a [`Error::DuplicateSection`].
    pub fn duplicate_section(name: &str) -> Self {
        Error::DuplicateSection(name.to_string())
    }

    /// Creates a type mismatch error for deserialization.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::type_mismatch("integer", "list");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    pub fn invalid_subscript(msg: &str) -> Self {
        Error::InvalidSubscriptType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Classifies an I/O failure that happened while using a stream in `mode`.
    ///
    /// A bad file descriptor means the handle was opened without the needed
    /// access (e.g. a write-only file handed to [`load`](crate::load)). Broken
    /// pipes and zero-length writes mean the other end is gone.
    pub fn from_io(err: &io::Error, mode: StreamMode) -> Self {
        if is_bad_descriptor(err) {
            return Error::InvalidStreamMode { expected: mode };
        }

        match err.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::WriteZero
            | io::ErrorKind::NotConnected
                if mode == StreamMode::Write =>
            {
                Error::ClosedResource
            }
            _ => Error::Io(err.to_string()),
        }
    }
}

// EBADF on Linux, macOS and the BSDs. Elsewhere wrong-mode handles map to `Io`.
#[cfg(unix)]
fn is_bad_descriptor(err: &io::Error) -> bool {
    const EBADF: i32 = 9;
    err.raw_os_error() == Some(EBADF)
}

#[cfg(not(unix))]
fn is_bad_descriptor(_err: &io::Error) -> bool {
    false
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_bad_descriptor_is_stream_mode() {
        let err = io::Error::from_raw_os_error(9);
        assert_eq!(
            Error::from_io(&err, StreamMode::Read),
            Error::InvalidStreamMode {
                expected: StreamMode::Read
            }
        );
    }

    #[cfg(not(unix))]
    #[test]
    fn test_os_error_nine_is_plain_io_off_unix() {
        let err = io::Error::from_raw_os_error(9);
        assert!(matches!(
            Error::from_io(&err, StreamMode::Read),
            Error::Io(_)
        ));
    }

    #[test]
    fn test_broken_pipe_is_closed_resource_on_write() {
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        assert_eq!(Error::from_io(&err, StreamMode::Write), Error::ClosedResource);
        assert!(matches!(
            Error::from_io(&err, StreamMode::Read),
            Error::Io(_)
        ));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::duplicate_section("a").to_string(),
            "cannot create existing section \"a\""
        );
        assert_eq!(
            Error::InvalidStreamMode {
                expected: StreamMode::Write
            }
            .to_string(),
            "stream is not open for writing"
        );
    }
}
