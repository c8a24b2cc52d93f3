//! INI deserialization.
//!
//! The [`Deserializer`] walks an [`IniValue`] tree. Text input goes through
//! the mapping view first: default-section keys are top-level fields and each
//! section is a nested struct or map.
//!
//! Scalars are read leniently, since INI values carry no declared type:
//!
//! - any scalar deserializes into a `String`; values read from a file give the
//!   text as written (`1.10` stays `"1.10"`), others their canonical text
//! - integral floats deserialize into integers
//! - integer-looking strings deserialize into integers, likewise for floats
//! - integers deserialize into floats
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_ini::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { port: u16, name: String }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { debug: bool, server: Server }
//!
//! let text = "debug = true\n[server]\nport = 8080.0\nname = 42";
//! let config: Config = from_str(text).unwrap();
//!
//! assert_eq!(config.server, Server { port: 8080, name: "42".to_string() });
//! ```

use crate::{Document, Error, IniMap, IniValue, Number, Result, Section};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::de;

/// Deserializer over an owned [`IniValue`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_ini::{de::Deserializer, IniValue};
///
/// let ports = Vec::<u16>::deserialize(Deserializer::new(serde_ini::coerce("[80, 443]"))).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
pub struct Deserializer {
    value: IniValue,
    raw: Raw,
}

/// The text a value was coerced from, mirroring the shape of the value.
enum Raw {
    Absent,
    Text(String),
    Fields(IndexMap<String, Raw>),
}

impl Raw {
    fn into_fields(self) -> IndexMap<String, Raw> {
        match self {
            Raw::Fields(fields) => fields,
            _ => IndexMap::new(),
        }
    }
}

fn raw_fields(section: &Section) -> IndexMap<String, Raw> {
    section
        .iter()
        .map(|(key, value)| (key.to_string(), Raw::Text(value.to_string())))
        .collect()
}

impl Deserializer {
    #[must_use]
    pub fn new(value: IniValue) -> Self {
        Deserializer {
            value,
            raw: Raw::Absent,
        }
    }

    /// Parses INI text and deserializes from its mapping view.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &str) -> Self {
        Self::from_document(&crate::loads(input))
    }

    /// Deserializes from a document's mapping view, keeping each value's
    /// text for `String` fields.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let mut fields = raw_fields(doc.default_section());
        for section in doc.sections().skip(1) {
            fields.insert(section.name().to_string(), Raw::Fields(raw_fields(section)));
        }

        Deserializer {
            value: IniValue::Map(doc.to_map()),
            raw: Raw::Fields(fields),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.value.type_name())
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn visit_bigint<'de, V>(bi: &BigInt, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Ok(u) = u64::try_from(bi) {
        visitor.visit_u64(u)
    } else if let Ok(i) = i128::try_from(bi) {
        visitor.visit_i128(i)
    } else if let Ok(u) = u128::try_from(bi) {
        visitor.visit_u128(u)
    } else {
        visitor.visit_string(bi.to_string())
    }
}

impl Deserializer {
    fn deserialize_integer<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            IniValue::Number(Number::Float(f)) if is_integral(f) => visitor.visit_i64(f as i64),
            IniValue::BigInt(ref bi) => visit_bigint(bi, visitor),
            IniValue::String(ref s) => match s.trim().parse::<i64>() {
                Ok(i) => visitor.visit_i64(i),
                Err(_) => Err(self.mismatch("integer")),
            },
            _ => Err(self.mismatch("integer")),
        }
    }

    fn deserialize_float<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let parsed = match &self.value {
            IniValue::Number(n) => Some(n.as_f64()),
            IniValue::BigInt(bi) => bi.to_string().parse::<f64>().ok(),
            IniValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(f) => visitor.visit_f64(f),
            None => Err(self.mismatch("float")),
        }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Null => visitor.visit_unit(),
            IniValue::Bool(b) => visitor.visit_bool(b),
            IniValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            IniValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            IniValue::BigInt(ref bi) => visit_bigint(bi, visitor),
            IniValue::String(s) => visitor.visit_string(s),
            IniValue::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            IniValue::Map(map) => {
                visitor.visit_map(MapDeserializer::new(map, self.raw.into_fields()))
            }
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Bool(b) => visitor.visit_bool(b),
            IniValue::Number(Number::Integer(i @ (0 | 1))) => visitor.visit_bool(i == 1),
            _ => Err(self.mismatch("boolean")),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_float(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_float(visitor)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match (self.value, self.raw) {
            (IniValue::String(s), _) => visitor.visit_string(s),
            (_, Raw::Text(text)) => visitor.visit_string(text),
            (value @ (IniValue::List(_) | IniValue::Map(_)), _) => {
                Err(Error::type_mismatch("string", value.type_name()))
            }
            (scalar, _) => visitor.visit_string(scalar.to_string()),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            IniValue::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            _ => Err(self.mismatch("bytes")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Null => visitor.visit_unit(),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            _ => Err(self.mismatch("list")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Map(map) => {
                visitor.visit_map(MapDeserializer::new(map, self.raw.into_fields()))
            }
            _ => Err(self.mismatch("map")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            IniValue::Map(map) if map.len() == 1 => match map.into_iter().next() {
                Some((variant, value)) => {
                    visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                }
                None => Err(Error::type_mismatch("enum", "empty map")),
            },
            _ => Err(self.mismatch("enum")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<IniValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<IniValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, IniValue>,
    raw: IndexMap<String, Raw>,
    value: Option<Deserializer>,
}

impl MapDeserializer {
    fn new(map: IniMap, raw: IndexMap<String, Raw>) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            raw,
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let raw = self.raw.swap_remove(&key).unwrap_or(Raw::Absent);
                self.value = Some(Deserializer { value, raw });
                seed.deserialize(Deserializer::new(IniValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(value),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<IniValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<IniValue>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::new(IniValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<IniValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(IniValue::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(IniValue::List(list)) => visitor.visit_seq(SeqDeserializer::new(list)),
            Some(other) => Err(Error::type_mismatch("tuple variant", other.type_name())),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(IniValue::Map(map)) => {
                visitor.visit_map(MapDeserializer::new(map, IndexMap::new()))
            }
            Some(other) => Err(Error::type_mismatch("struct variant", other.type_name())),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}
