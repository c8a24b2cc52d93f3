//! Typed values produced by coercing raw INI text.
//!
//! INI stores every value as text. [`coerce`](crate::coerce()) reads that text
//! through a small literal grammar and returns an [`IniValue`]:
//!
//! - [`IniValue::Null`], [`IniValue::Bool`], [`IniValue::Number`]
//! - [`IniValue::BigInt`] for integers that do not fit in an `i64`
//! - [`IniValue::List`] for `[...]` and `(...)` literals
//! - [`IniValue::Map`] for `{"key": value}` literals and whole sections
//! - [`IniValue::String`] for everything else
//!
//! ## Canonical form
//!
//! `Display` writes the canonical literal of a value, which coerces back to the
//! same value:
//!
//! ```rust
//! use serde_ini::{coerce, IniValue};
//!
//! let value = IniValue::from(vec![IniValue::from(1), IniValue::from("two")]);
//! assert_eq!(value.to_string(), r#"[1, "two"]"#);
//! assert_eq!(coerce(&value.to_string()), value);
//!
//! // Strings stay bare unless they would read back as something else
//! assert_eq!(IniValue::from("hello").to_string(), "hello");
//! assert_eq!(IniValue::from("42").to_string(), r#""42""#);
//! ```

use crate::IniMap;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed INI value.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{IniValue, Number};
///
/// let port = IniValue::Number(Number::Integer(8080));
/// let name = IniValue::String("api".to_string());
///
/// assert!(port.is_number());
/// assert_eq!(port.as_i64(), Some(8080));
/// assert_eq!(name.as_str(), Some("api"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum IniValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    BigInt(BigInt),
    String(String),
    List(Vec<IniValue>),
    Map(IniMap),
}

/// A numeric value that fits in machine types.
///
/// # Examples
///
/// ```rust
/// use serde_ini::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::Float(3.5).as_f64(), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Number;
    ///
    /// assert_eq!(Number::Integer(7).as_i64(), Some(7));
    /// assert_eq!(Number::Float(7.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => {
                let text = fl.to_string();
                // A float must keep its point, or it reads back as an integer.
                if fl.is_finite() && !text.contains(['.', 'e', 'E']) {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl IniValue {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, IniValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, IniValue::Bool(_))
    }

    /// Returns `true` for machine-sized numbers. Big integers are not included.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, IniValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, IniValue::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, IniValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, IniValue::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, IniValue::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            IniValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IniValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::coerce;
    ///
    /// assert_eq!(coerce("42").as_i64(), Some(42));
    /// assert_eq!(coerce("42.0").as_i64(), Some(42));
    /// assert_eq!(coerce("forty-two").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            IniValue::Number(n) => n.as_i64(),
            IniValue::BigInt(bi) => i64::try_from(bi).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IniValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            IniValue::BigInt(bi) => Some(bi),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<IniValue>> {
        match self {
            IniValue::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&IniMap> {
        match self {
            IniValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            IniValue::Null => "null",
            IniValue::Bool(_) => "boolean",
            IniValue::Number(Number::Integer(_)) | IniValue::BigInt(_) => "integer",
            IniValue::Number(Number::Float(_)) => "float",
            IniValue::String(_) => "string",
            IniValue::List(_) => "list",
            IniValue::Map(_) => "map",
        }
    }

    /// Whether a string must be quoted to survive a write/parse/coerce cycle
    /// as the same string when written as a whole value.
    fn needs_quotes(s: &str) -> bool {
        if s.trim() != s || s.contains(['\n', '\r']) || s.ends_with('\\') {
            return true;
        }

        // Would be taken for an inline comment
        if s.starts_with(['#', ';']) || has_comment_marker(s) {
            return true;
        }

        // Would read back as a number, boolean, null or container
        !matches!(crate::coerce(s), IniValue::String(ref back) if back == s)
    }
}

fn has_comment_marker(s: &str) -> bool {
    let mut prev_ws = false;
    for ch in s.chars() {
        if prev_ws && (ch == '#' || ch == ';') {
            return true;
        }
        prev_ws = ch.is_whitespace();
    }
    false
}

pub(crate) fn write_quoted(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\0' => f.write_str("\\0")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

fn write_nested(f: &mut fmt::Formatter<'_>, value: &IniValue) -> fmt::Result {
    match value {
        IniValue::String(s) => write_quoted(f, s),
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniValue::Null => f.write_str("null"),
            IniValue::Bool(b) => write!(f, "{}", b),
            IniValue::Number(n) => write!(f, "{}", n),
            IniValue::BigInt(bi) => write!(f, "{}", bi),
            IniValue::String(s) => {
                if Self::needs_quotes(s) {
                    write_quoted(f, s)
                } else {
                    f.write_str(s)
                }
            }
            IniValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_nested(f, item)?;
                }
                f.write_str("]")
            }
            IniValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    f.write_str(": ")?;
                    write_nested(f, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for IniValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            IniValue::Null => serializer.serialize_unit(),
            IniValue::Bool(b) => serializer.serialize_bool(*b),
            IniValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            IniValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            IniValue::BigInt(bi) => match i128::try_from(bi) {
                Ok(i) => serializer.serialize_i128(i),
                Err(_) => serializer.serialize_str(&bi.to_string()),
            },
            IniValue::String(s) => serializer.serialize_str(s),
            IniValue::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            IniValue::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for IniValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IniValueVisitor;

        impl<'de> Visitor<'de> for IniValueVisitor {
            type Value = IniValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any INI value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(IniValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(IniValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(IniValue::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => IniValue::Number(Number::Integer(i)),
                    Err(_) => IniValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => IniValue::Number(Number::Integer(i)),
                    Err(_) => IniValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(IniValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(IniValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(IniValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(IniValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(IniValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut list = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    list.push(elem);
                }
                Ok(IniValue::List(list))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = IniMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(IniValue::Map(values))
            }
        }

        deserializer.deserialize_any(IniValueVisitor)
    }
}

impl TryFrom<IniValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::type_mismatch("integer", value.type_name()))
    }
}

impl TryFrom<IniValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("float", value.type_name()))
    }
}

impl TryFrom<IniValue> for bool {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::type_mismatch("boolean", value.type_name()))
    }
}

impl TryFrom<IniValue> for String {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        match value {
            IniValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl From<bool> for IniValue {
    fn from(value: bool) -> Self {
        IniValue::Bool(value)
    }
}

impl From<i32> for IniValue {
    fn from(value: i32) -> Self {
        IniValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for IniValue {
    fn from(value: i64) -> Self {
        IniValue::Number(Number::Integer(value))
    }
}

impl From<u32> for IniValue {
    fn from(value: u32) -> Self {
        IniValue::Number(Number::Integer(value as i64))
    }
}

impl From<u64> for IniValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => IniValue::Number(Number::Integer(i)),
            Err(_) => IniValue::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f64> for IniValue {
    fn from(value: f64) -> Self {
        IniValue::Number(Number::Float(value))
    }
}

impl From<BigInt> for IniValue {
    fn from(value: BigInt) -> Self {
        IniValue::BigInt(value)
    }
}

impl From<String> for IniValue {
    fn from(value: String) -> Self {
        IniValue::String(value)
    }
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        IniValue::String(value.to_string())
    }
}

impl From<Vec<IniValue>> for IniValue {
    fn from(value: Vec<IniValue>) -> Self {
        IniValue::List(value)
    }
}

impl From<IniMap> for IniValue {
    fn from(value: IniMap) -> Self {
        IniValue::Map(value)
    }
}
