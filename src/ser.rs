//! INI serialization.
//!
//! Two writers live here:
//!
//! - [`write_document`] turns a [`Document`] back into text, entry by entry,
//!   so a parsed file keeps its comments, blank lines and ordering
//! - [`IniValueSerializer`] turns any `Serialize` type into an [`IniValue`],
//!   which the crate-root [`to_string`](crate::to_string) then lays out as
//!   sections through the mapping view
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini::to_string;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { debug: bool, server: Server }
//!
//! let config = Config {
//!     debug: false,
//!     server: Server { host: "localhost".to_string(), port: 8080 },
//! };
//!
//! assert_eq!(
//!     to_string(&config).unwrap(),
//!     "debug = false\n[server]\nhost = localhost\nport = 8080"
//! );
//! ```

use crate::document::{Entry, InlineComment, Pair, Section};
use crate::{Document, Error, IniMap, IniOptions, IniValue, Number, Result};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// Writes a document as INI text.
///
/// Lines are joined with `\n` and no newline follows the last one. The
/// default section has no header.
#[must_use]
pub fn write_document(doc: &Document, options: &IniOptions) -> String {
    let mut writer = Writer {
        output: String::with_capacity(256),
        options,
        lines: 0,
    };

    for section in doc.sections() {
        writer.write_section(section);
    }

    writer.output
}

struct Writer<'o> {
    output: String,
    options: &'o IniOptions,
    lines: usize,
}

impl Writer<'_> {
    fn start_line(&mut self) {
        if self.lines > 0 {
            self.output.push('\n');
        }
        self.lines += 1;
    }

    fn write_section(&mut self, section: &Section) {
        if !section.is_default() {
            self.start_line();
            let depth = section.depth().max(1);
            self.output.extend(std::iter::repeat('[').take(depth));
            self.output.push_str(section.name());
            self.output.extend(std::iter::repeat(']').take(depth));
            if let Some(comment) = section.comment() {
                self.write_inline_comment(comment);
            }
        }

        for entry in section.entries() {
            self.start_line();
            match entry {
                Entry::Pair(pair) => self.write_pair(pair),
                Entry::Blank => {}
                Entry::Comment { delimiter, text } => {
                    self.output.push(*delimiter);
                    self.output.push_str(text);
                }
                Entry::Raw(text) => self.output.push_str(text),
            }
        }
    }

    fn write_pair(&mut self, pair: &Pair) {
        let spaced = self.options.spaced_separator;

        self.output.push_str(&pair.key);
        if spaced && pair.separator == '=' {
            self.output.push(' ');
        }
        self.output.push(pair.separator);

        // A space before a leading marker would turn the value into a comment
        if spaced && !pair.value.is_empty() && !pair.value.starts_with(['#', ';']) {
            self.output.push(' ');
        }
        self.output.push_str(&pair.value);

        if let Some(comment) = &pair.comment {
            self.write_inline_comment(comment);
        }
    }

    fn write_inline_comment(&mut self, comment: &InlineComment) {
        self.output.push(' ');
        self.output.push(comment.delimiter);
        self.output.push_str(&comment.text);
    }
}

/// Serializes any value into an [`IniValue`].
///
/// Structs and maps become [`IniValue::Map`], sequences and tuples become
/// [`IniValue::List`]. Enum variants with data are externally tagged as a
/// one-entry map. Integers that do not fit `i64` become big integers.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_ini::{IniValue, IniValueSerializer};
///
/// let value = vec![1u64, u64::MAX].serialize(IniValueSerializer).unwrap();
/// let list = value.as_list().unwrap();
///
/// assert_eq!(list[0], IniValue::from(1));
/// assert!(list[1].is_bigint());
/// ```
pub struct IniValueSerializer;

pub struct SerializeVec {
    vec: Vec<IniValue>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<IniValue>,
}

pub struct SerializeMap {
    map: IniMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: IniMap,
}

fn tagged(variant: &str, value: IniValue) -> IniValue {
    let mut map = IniMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    IniValue::Map(map)
}

impl ser::Serializer for IniValueSerializer {
    type Ok = IniValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<IniValue> {
        Ok(IniValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_i16(self, v: i16) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_i32(self, v: i32) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_i64(self, v: i64) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<IniValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => IniValue::Number(Number::Integer(i)),
            Err(_) => IniValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_u8(self, v: u8) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_u16(self, v: u16) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_u32(self, v: u32) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(i64::from(v))))
    }

    fn serialize_u64(self, v: u64) -> Result<IniValue> {
        Ok(IniValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<IniValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => IniValue::Number(Number::Integer(i)),
            Err(_) => IniValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Float(f64::from(v))))
    }

    fn serialize_f64(self, v: f64) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<IniValue> {
        Ok(IniValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<IniValue> {
        Ok(IniValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<IniValue> {
        let vec = v
            .iter()
            .map(|&b| IniValue::Number(Number::Integer(i64::from(b))))
            .collect();
        Ok(IniValue::List(vec))
    }

    fn serialize_none(self) -> Result<IniValue> {
        Ok(IniValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<IniValue> {
        Ok(IniValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<IniValue> {
        Ok(IniValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<IniValue> {
        Ok(IniValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_ini_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: IniMap::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: IniMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<IniValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<IniValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(tagged(self.variant, IniValue::List(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_ini_value(key)? {
            IniValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::invalid_subscript(&format!(
                "map keys must be strings, found {}",
                other.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(tagged(self.variant, IniValue::Map(self.map)))
    }
}

pub(crate) fn to_ini_value<T: Serialize + ?Sized>(value: &T) -> Result<IniValue> {
    value.serialize(IniValueSerializer)
}

/// Serializes a value that must come out as a mapping, the shape a whole
/// INI file has.
pub(crate) fn to_ini_map<T: Serialize + ?Sized>(value: &T) -> Result<IniMap> {
    match to_ini_value(value)? {
        IniValue::Map(map) => Ok(map),
        other => Err(Error::invalid_subscript(&format!(
            "expected a map or struct at the top level, found {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads;
    use std::collections::BTreeMap;

    fn write(text: &str) -> String {
        write_document(&loads(text), &IniOptions::default())
    }

    #[test]
    fn test_layout_round_trip() {
        let text = "; top\n\n[a]\nx = 1 # note\n  raw line\n[[b]]\ny: 2\n";
        assert_eq!(write(text), text);
    }

    #[test]
    fn test_separator_normalized() {
        assert_eq!(write("a=1\nb   :   2"), "a = 1\nb: 2");

        let compact = IniOptions::new().with_spaced_separator(false);
        assert_eq!(write_document(&loads("a = 1 ;c\nb: 2"), &compact), "a=1 ;c\nb:2");
    }

    #[test]
    fn test_marker_led_value_stays_a_value() {
        let doc = loads("color=#fff");
        let text = write_document(&doc, &IniOptions::default());

        assert_eq!(text, "color =#fff");
        assert_eq!(loads(&text), doc);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(write("a =\nb = ; why"), "a =\nb = ; why");
    }

    #[test]
    fn test_value_serializer_enums() {
        #[derive(Serialize)]
        enum Shape {
            Point,
            Circle(f64),
            Rect { w: u32, h: u32 },
        }

        assert_eq!(to_ini_value(&Shape::Point).unwrap(), IniValue::from("Point"));

        let circle = to_ini_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle.to_string(), "{\"Circle\": 1.5}");

        let rect = to_ini_value(&Shape::Rect { w: 2, h: 3 }).unwrap();
        assert_eq!(rect.to_string(), "{\"Rect\": {\"w\": 2, \"h\": 3}}");
    }

    #[test]
    fn test_non_string_map_keys_rejected() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");

        assert!(matches!(
            to_ini_value(&map),
            Err(Error::InvalidSubscriptType(_))
        ));
    }

    #[test]
    fn test_top_level_must_be_map() {
        assert!(matches!(
            to_ini_map(&vec![1, 2]),
            Err(Error::InvalidSubscriptType(_))
        ));
    }
}
