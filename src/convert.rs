//! Converters between wire text, tree values, and typed host values.
//!
//! The [`Catalog`] carries the host-registered enumeration table and
//! implements the three conversion directions for every [`Kind`]:
//! text to scalar, scalar to text, and tree value to scalar. Wire
//! conventions are fixed: dates travel as RFC 1123 (ISO 8601 accepted
//! on input), enumeration members as `TypeName#Member`, and
//! arbitrary-precision integers as big-endian two's-complement hex.

use std::collections::HashMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::date;
use crate::error::{Error, JsonResult};
use crate::kind::{Kind, Scalar};
use crate::number::Number;
use crate::value::Value;

/// Conversion catalog owning the host's enumeration registry.
#[derive(Debug, Default)]
pub struct Catalog {
    enums: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Empty catalog with no enumerations registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration type and its member names.
    ///
    /// Registering the same type again replaces its member list.
    pub fn register_enum(
        &mut self,
        type_name: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.enums.insert(
            type_name.into(),
            members.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Resolve a member of a registered enumeration.
    pub fn resolve_enum(&self, type_name: &str, member: &str) -> JsonResult<Scalar> {
        let members = self
            .enums
            .get(type_name)
            .ok_or_else(|| Error::coercion(type_name, "string"))?;
        if members.iter().any(|m| m == member) {
            Ok(Scalar::Enum {
                type_name: type_name.to_string(),
                member: member.to_string(),
            })
        } else {
            Err(Error::coercion(format!("{type_name}#{member}"), "string"))
        }
    }

    /// Convert wire text to a typed value of the given kind.
    pub fn from_text(&self, kind: Kind, text: &str) -> JsonResult<Scalar> {
        match kind {
            Kind::Text => Ok(Scalar::Text(text.to_string())),
            // Anything but a case-insensitive "true" is false.
            Kind::Boolean => Ok(Scalar::Boolean(text.eq_ignore_ascii_case("true"))),
            Kind::Byte => decode_integer(text)
                .and_then(|v| i8::try_from(v).ok())
                .map(Scalar::Byte)
                .ok_or_else(|| Error::coercion("Byte", "string")),
            Kind::Character => text
                .chars()
                .next()
                .map(Scalar::Character)
                .ok_or_else(|| Error::coercion("Character", "string")),
            Kind::Short => decode_integer(text)
                .and_then(|v| i16::try_from(v).ok())
                .map(Scalar::Short)
                .ok_or_else(|| Error::coercion("Short", "string")),
            Kind::Integer => decode_integer(text)
                .and_then(|v| i32::try_from(v).ok())
                .map(Scalar::Integer)
                .ok_or_else(|| Error::coercion("Integer", "string")),
            Kind::Long => decode_integer(text)
                .map(Scalar::Long)
                .ok_or_else(|| Error::coercion("Long", "string")),
            Kind::Float => f32::from_str(text)
                .map(Scalar::Float)
                .map_err(|_| Error::coercion("Float", "string")),
            Kind::Double => f64::from_str(text)
                .map(Scalar::Double)
                .map_err(|_| Error::coercion("Double", "string")),
            Kind::Date => date::parse(text)
                .map(Scalar::Date)
                .ok_or_else(|| Error::coercion("Date", "string")),
            Kind::Enum => match text.split_once('#') {
                Some((type_name, member)) => self.resolve_enum(type_name, member),
                None => Err(Error::coercion("Enum", "string")),
            },
            Kind::BigInteger => hex::decode(text)
                .map(|bytes| Scalar::BigInteger(BigInt::from_signed_bytes_be(&bytes)))
                .map_err(|_| Error::coercion("BigInteger", "string")),
            Kind::BigDecimal => BigDecimal::from_str(text)
                .map(Scalar::BigDecimal)
                .map_err(|_| Error::coercion("BigDecimal", "string")),
        }
    }

    /// Render a typed value to its wire text form.
    pub fn to_text(&self, scalar: &Scalar) -> String {
        match scalar {
            Scalar::Text(v) => v.clone(),
            Scalar::Boolean(v) => v.to_string(),
            Scalar::Byte(v) => v.to_string(),
            Scalar::Character(v) => v.to_string(),
            Scalar::Short(v) => v.to_string(),
            Scalar::Integer(v) => v.to_string(),
            Scalar::Long(v) => v.to_string(),
            // Debug keeps the fractional marker on integral floats.
            Scalar::Float(v) => format!("{v:?}"),
            Scalar::Double(v) => format!("{v:?}"),
            Scalar::Date(v) => date::format_rfc1123(v),
            Scalar::Enum { type_name, member } => format!("{type_name}#{member}"),
            Scalar::BigInteger(v) => hex::encode(v.to_signed_bytes_be()),
            Scalar::BigDecimal(v) => v.to_string(),
        }
    }

    /// Convert a tree value to a typed value of the given kind.
    ///
    /// Accepts the kind's native representation, its wire text form, and
    /// for the numeric kinds any Number value via narrowing. Dates also
    /// accept a millisecond epoch offset, characters a code point.
    pub fn from_value(&self, kind: Kind, value: &Value) -> JsonResult<Scalar> {
        match (kind, value) {
            (_, Value::String(text)) => self.from_text(kind, text),

            (Kind::Boolean, Value::Bool(v)) => Ok(Scalar::Boolean(*v)),
            (Kind::Byte, Value::Number(n)) => Ok(Scalar::Byte(n.as_byte())),
            (Kind::Short, Value::Number(n)) => Ok(Scalar::Short(n.as_short())),
            (Kind::Integer, Value::Number(n)) => Ok(Scalar::Integer(n.as_integer())),
            (Kind::Long, Value::Number(n)) => Ok(Scalar::Long(n.as_long())),
            (Kind::Float, Value::Number(n)) => Ok(Scalar::Float(n.as_float())),
            (Kind::Double, Value::Number(n)) => Ok(Scalar::Double(n.as_double())),
            (Kind::Character, Value::Number(n)) => {
                // Stored characters narrow through the integer form.
                char::from_u32(n.as_long() as u16 as u32)
                    .map(Scalar::Character)
                    .ok_or_else(|| Error::coercion("Character", value.type_name()))
            }
            (Kind::Date, Value::Number(n)) => date::from_millis(n.as_long())
                .map(Scalar::Date)
                .ok_or_else(|| Error::coercion("Date", value.type_name())),
            (Kind::BigInteger, Value::Number(Number::BigInt(v))) => {
                Ok(Scalar::BigInteger(v.clone()))
            }
            (Kind::BigInteger, Value::Number(n)) => Ok(Scalar::BigInteger(BigInt::from(n.as_long()))),
            (Kind::BigDecimal, Value::Number(Number::BigDec(v))) => {
                Ok(Scalar::BigDecimal(v.clone()))
            }
            (Kind::BigDecimal, Value::Number(n)) => BigDecimal::try_from(n.as_double())
                .map(Scalar::BigDecimal)
                .map_err(|_| Error::coercion("BigDecimal", value.type_name())),

            _ => Err(Error::coercion(kind.name(), value.type_name())),
        }
    }
}

/// Parse integral text the way the original storage layer did: an
/// optional sign, then `0x`/`0X`/`#` hex, a leading `0` octal run, or
/// plain decimal.
fn decode_integer(text: &str) -> Option<i64> {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if let Some(hex) = magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
        .or_else(|| magnitude.strip_prefix('#'))
    {
        let value = i64::from_str_radix(hex, 16).ok()?;
        Some(if negative { -value } else { value })
    } else if magnitude.len() > 1 && magnitude.starts_with('0') {
        let value = i64::from_str_radix(&magnitude[1..], 8).ok()?;
        Some(if negative { -value } else { value })
    } else {
        i64::from_str(text).ok()
    }
}

impl Value {
    /// Read an object member as a typed value of the given kind.
    pub fn get_as(&self, key: &str, kind: Kind, catalog: &Catalog) -> JsonResult<Scalar> {
        catalog.from_value(kind, self.at(key)?)
    }

    /// Wrap a typed value and store it under the given key.
    pub fn set_value(
        &mut self,
        key: impl Into<String>,
        scalar: Scalar,
    ) -> JsonResult<&mut Self> {
        self.set(key, scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_boolean_from_text() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.from_text(Kind::Boolean, "TRUE").unwrap(),
            Scalar::Boolean(true)
        );
        assert_eq!(
            catalog.from_text(Kind::Boolean, "yes").unwrap(),
            Scalar::Boolean(false)
        );
    }

    #[test]
    fn test_integer_decode_radixes() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.from_text(Kind::Integer, "0x1F").unwrap(),
            Scalar::Integer(31)
        );
        assert_eq!(
            catalog.from_text(Kind::Integer, "#ff").unwrap(),
            Scalar::Integer(255)
        );
        assert_eq!(
            catalog.from_text(Kind::Integer, "010").unwrap(),
            Scalar::Integer(8)
        );
        assert_eq!(
            catalog.from_text(Kind::Long, "-42").unwrap(),
            Scalar::Long(-42)
        );
        assert!(catalog.from_text(Kind::Byte, "300").is_err());
        assert!(catalog.from_text(Kind::Integer, "1.5").is_err());
    }

    #[test]
    fn test_numeric_narrowing_from_value() {
        let catalog = Catalog::new();
        let value = Value::from(300i64);
        assert_eq!(
            catalog.from_value(Kind::Integer, &value).unwrap(),
            Scalar::Integer(300)
        );
        // Narrowing wraps, as the integer form does.
        assert_eq!(
            catalog.from_value(Kind::Byte, &value).unwrap(),
            Scalar::Byte(44)
        );
        assert_eq!(
            catalog.from_value(Kind::Double, &Value::from(2.5f64)).unwrap(),
            Scalar::Double(2.5)
        );
        assert!(catalog.from_value(Kind::Integer, &Value::Bool(true)).is_err());
    }

    #[test]
    fn test_character_conversions() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.from_value(Kind::Character, &Value::from(65i64)).unwrap(),
            Scalar::Character('A')
        );
        assert_eq!(
            catalog.from_text(Kind::Character, "hello").unwrap(),
            Scalar::Character('h')
        );
        assert!(catalog.from_text(Kind::Character, "").is_err());
    }

    #[test]
    fn test_date_conversions() {
        let catalog = Catalog::new();
        let epoch = catalog
            .from_value(Kind::Date, &Value::from(0i64))
            .unwrap();
        assert_eq!(
            catalog.to_text(&epoch),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
        let same = catalog
            .from_text(Kind::Date, "1970-01-01T00:00:00.000Z")
            .unwrap();
        assert_eq!(epoch, same);
        assert!(catalog.from_text(Kind::Date, "not a date").is_err());
    }

    #[test]
    fn test_enum_registry() {
        let mut catalog = Catalog::new();
        catalog.register_enum("Color", ["Red", "Green", "Blue"]);

        let member = catalog.from_text(Kind::Enum, "Color#Green").unwrap();
        assert_eq!(catalog.to_text(&member), "Color#Green");
        assert!(catalog.from_text(Kind::Enum, "Color#Purple").is_err());
        assert!(catalog.from_text(Kind::Enum, "Shape#Round").is_err());
        assert!(catalog.from_text(Kind::Enum, "no separator").is_err());
    }

    #[test]
    fn test_big_integer_hex_round_trip() {
        let catalog = Catalog::new();
        let original = Scalar::BigInteger(BigInt::from_str("1234567890123456789012345").unwrap());
        let text = catalog.to_text(&original);
        let back = catalog.from_text(Kind::BigInteger, &text).unwrap();
        assert_eq!(original, back);

        // Two's complement keeps the sign.
        let negative = Scalar::BigInteger(BigInt::from(-1));
        assert_eq!(catalog.to_text(&negative), "ff");
        assert_eq!(
            catalog.from_text(Kind::BigInteger, "ff").unwrap(),
            negative
        );
    }

    #[test]
    fn test_big_decimal_text() {
        let catalog = Catalog::new();
        let v = catalog.from_text(Kind::BigDecimal, "123456789012345678.9").unwrap();
        assert_eq!(catalog.to_text(&v), "123456789012345678.9");
    }

    #[test]
    fn test_typed_field_access() {
        let mut catalog = Catalog::new();
        catalog.register_enum("Color", ["Red"]);

        let mut obj = Value::object();
        obj.set("count", 7i64).unwrap();
        obj.set_value("hue", Scalar::Enum {
            type_name: "Color".to_string(),
            member: "Red".to_string(),
        })
        .unwrap();

        assert_eq!(
            obj.get_as("count", Kind::Integer, &catalog).unwrap(),
            Scalar::Integer(7)
        );
        assert_eq!(
            obj.get_as("hue", Kind::Enum, &catalog).unwrap(),
            Scalar::Enum {
                type_name: "Color".to_string(),
                member: "Red".to_string(),
            }
        );
        assert_eq!(obj.at("hue").unwrap(), &Value::from("Color#Red"));
    }
}
