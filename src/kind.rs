//! Catalog of primitive host kinds and the typed value that carries them.
//!
//! `Kind` enumerates the host types the conversion layer understands.
//! Kinds are addressed by name through a process-wide map populated once
//! on first use; the map keeps the legacy fully qualified Java names as
//! wire-compatible aliases alongside the short names.

use std::collections::HashMap;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;

use crate::date;
use crate::number::Number;
use crate::value::Value;

/// The primitive host kinds the conversion layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Plain text.
    Text,
    /// True or false.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// A single character.
    Character,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTC instant.
    Date,
    /// A member of a host-registered enumeration.
    Enum,
    /// Arbitrary-precision integer.
    BigInteger,
    /// Arbitrary-precision decimal.
    BigDecimal,
}

/// Every kind, in declaration order.
pub const ALL_KINDS: [Kind; 13] = [
    Kind::Text,
    Kind::Boolean,
    Kind::Byte,
    Kind::Character,
    Kind::Short,
    Kind::Integer,
    Kind::Long,
    Kind::Float,
    Kind::Double,
    Kind::Date,
    Kind::Enum,
    Kind::BigInteger,
    Kind::BigDecimal,
];

impl Kind {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Text => "Text",
            Kind::Boolean => "Boolean",
            Kind::Byte => "Byte",
            Kind::Character => "Character",
            Kind::Short => "Short",
            Kind::Integer => "Integer",
            Kind::Long => "Long",
            Kind::Float => "Float",
            Kind::Double => "Double",
            Kind::Date => "Date",
            Kind::Enum => "Enum",
            Kind::BigInteger => "BigInteger",
            Kind::BigDecimal => "BigDecimal",
        }
    }

    /// Fully qualified legacy name kept for wire compatibility.
    pub fn java_name(&self) -> &'static str {
        match self {
            Kind::Text => "java.lang.String",
            Kind::Boolean => "java.lang.Boolean",
            Kind::Byte => "java.lang.Byte",
            Kind::Character => "java.lang.Character",
            Kind::Short => "java.lang.Short",
            Kind::Integer => "java.lang.Integer",
            Kind::Long => "java.lang.Long",
            Kind::Float => "java.lang.Float",
            Kind::Double => "java.lang.Double",
            Kind::Date => "java.util.Date",
            Kind::Enum => "java.lang.Enum",
            Kind::BigInteger => "java.math.BigInteger",
            Kind::BigDecimal => "java.math.BigDecimal",
        }
    }

    /// True for the fixed-width numeric kinds.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Kind::Short | Kind::Integer | Kind::Long | Kind::Float | Kind::Double
        )
    }

    /// True for the fixed-width integral kinds.
    pub fn is_integer(&self) -> bool {
        matches!(self, Kind::Short | Kind::Integer | Kind::Long)
    }

    /// Resolve a kind by name.
    ///
    /// Accepts the short name, the lowercase short name, the legacy
    /// fully qualified name and its lowercase form, plus the historical
    /// `bool`, `int` and `string` spellings.
    pub fn for_name(name: &str) -> Option<Kind> {
        static MAP: OnceLock<HashMap<String, Kind>> = OnceLock::new();
        let map = MAP.get_or_init(|| {
            let mut map = HashMap::new();
            for kind in ALL_KINDS {
                map.insert(kind.name().to_string(), kind);
                map.insert(kind.name().to_lowercase(), kind);
                map.insert(kind.java_name().to_string(), kind);
                map.insert(kind.java_name().to_lowercase(), kind);
            }
            map.insert("String".to_string(), Kind::Text);
            map.insert("string".to_string(), Kind::Text);
            map.insert("bool".to_string(), Kind::Boolean);
            map.insert("int".to_string(), Kind::Integer);
            map
        });
        map.get(name).copied()
    }
}

/// A typed host value carried by the converters.
///
/// This is what the catalog produces from JSON text or tree values, and
/// what it renders back to wire text.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Plain text.
    Text(String),
    /// True or false.
    Boolean(bool),
    /// 8-bit signed integer.
    Byte(i8),
    /// A single character.
    Character(char),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Integer(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// UTC instant.
    Date(DateTime<Utc>),
    /// A resolved enumeration member, carrying its type name.
    Enum {
        /// Registered enumeration type name.
        type_name: String,
        /// Member name within that type.
        member: String,
    },
    /// Arbitrary-precision integer.
    BigInteger(BigInt),
    /// Arbitrary-precision decimal.
    BigDecimal(BigDecimal),
}

impl Scalar {
    /// The kind this value belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Text(_) => Kind::Text,
            Scalar::Boolean(_) => Kind::Boolean,
            Scalar::Byte(_) => Kind::Byte,
            Scalar::Character(_) => Kind::Character,
            Scalar::Short(_) => Kind::Short,
            Scalar::Integer(_) => Kind::Integer,
            Scalar::Long(_) => Kind::Long,
            Scalar::Float(_) => Kind::Float,
            Scalar::Double(_) => Kind::Double,
            Scalar::Date(_) => Kind::Date,
            Scalar::Enum { .. } => Kind::Enum,
            Scalar::BigInteger(_) => Kind::BigInteger,
            Scalar::BigDecimal(_) => Kind::BigDecimal,
        }
    }
}

impl From<Scalar> for Value {
    /// Wrap a typed host value into the tree.
    ///
    /// Numerics become Number values. Characters, dates and enumeration
    /// members become String values in their wire text form.
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(v) => Value::String(v),
            Scalar::Boolean(v) => Value::Bool(v),
            Scalar::Byte(v) => Value::Number(Number::Long(v as i64)),
            Scalar::Character(v) => Value::String(v.to_string()),
            Scalar::Short(v) => Value::Number(Number::Long(v as i64)),
            Scalar::Integer(v) => Value::Number(Number::Long(v as i64)),
            Scalar::Long(v) => Value::Number(Number::Long(v)),
            Scalar::Float(v) => Value::Number(Number::Double(v as f64)),
            Scalar::Double(v) => Value::Number(Number::Double(v)),
            Scalar::Date(v) => Value::String(date::format_rfc1123(&v)),
            Scalar::Enum { type_name, member } => Value::String(format!("{type_name}#{member}")),
            Scalar::BigInteger(v) => Value::Number(Number::BigInt(v)),
            Scalar::BigDecimal(v) => Value::Number(Number::BigDec(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_aliases() {
        assert_eq!(Kind::for_name("Integer"), Some(Kind::Integer));
        assert_eq!(Kind::for_name("integer"), Some(Kind::Integer));
        assert_eq!(Kind::for_name("int"), Some(Kind::Integer));
        assert_eq!(Kind::for_name("bool"), Some(Kind::Boolean));
        assert_eq!(Kind::for_name("String"), Some(Kind::Text));
        assert_eq!(Kind::for_name("java.lang.String"), Some(Kind::Text));
        assert_eq!(Kind::for_name("java.math.biginteger"), Some(Kind::BigInteger));
        assert_eq!(Kind::for_name("java.util.Date"), Some(Kind::Date));
        assert_eq!(Kind::for_name("Widget"), None);
    }

    #[test]
    fn test_numeric_predicates() {
        assert!(Kind::Long.is_number());
        assert!(Kind::Double.is_number());
        assert!(!Kind::Byte.is_number());
        assert!(!Kind::BigInteger.is_number());
        assert!(Kind::Short.is_integer());
        assert!(!Kind::Float.is_integer());
    }

    #[test]
    fn test_scalar_kind() {
        assert_eq!(Scalar::Long(1).kind(), Kind::Long);
        let member = Scalar::Enum {
            type_name: "Color".to_string(),
            member: "Red".to_string(),
        };
        assert_eq!(member.kind(), Kind::Enum);
    }

    #[test]
    fn test_wrap_scalars() {
        assert_eq!(Value::from(Scalar::Boolean(true)), Value::Bool(true));
        assert_eq!(
            Value::from(Scalar::Integer(7)),
            Value::Number(Number::Long(7))
        );
        assert_eq!(
            Value::from(Scalar::Character('x')),
            Value::String("x".to_string())
        );
        let member = Scalar::Enum {
            type_name: "Color".to_string(),
            member: "Red".to_string(),
        };
        assert_eq!(Value::from(member), Value::String("Color#Red".to_string()));
        let epoch = Scalar::Date(date::from_millis(0).unwrap());
        assert_eq!(
            Value::from(epoch),
            Value::String("Thu, 01 Jan 1970 00:00:00 GMT".to_string())
        );
    }
}
