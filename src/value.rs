//! The JSON value tree.
//!
//! [`Value`] is a closed variant type; every child of an array or object
//! is itself a `Value`, never a raw host value. Exhaustive matching
//! replaces the throw-by-default virtual dispatch the model descends
//! from: operations that are meaningless for a variant return
//! [`Error::UnsupportedOperation`] from an explicit match arm.
//!
//! Objects preserve insertion order and keep keys unique; the last write
//! for a key wins. Cloning is deep, so [`Value::duplicate`] never aliases
//! children.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, JsonResult};
use crate::number::Number;

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// The `null` literal.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A numeric value, integral or fractional, of arbitrary precision.
    Number(Number),
    /// A text value.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A mapping from unique string keys to values, insertion-ordered.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// The null marker returned for absent object fields.
    pub const NULL: Value = Value::Null;

    /// An empty array value.
    pub fn array() -> Value {
        Value::Array(Vec::new())
    }

    /// An empty object value.
    pub fn object() -> Value {
        Value::Object(IndexMap::new())
    }

    /// Variant name used in error messages and for cross-variant ordering.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// True only for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The "absent or empty" predicate, distinct from [`Value::is_null`].
    ///
    /// An empty string, empty array, and empty object all report
    /// themselves as null-like in addition to `Null` itself. Null-like
    /// values sort before everything else.
    pub fn is_null_like(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// True for a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// True for a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// True for a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// True for an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// True for an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// True for a scalar leaf: string, number, or boolean.
    pub fn is_primitive(&self) -> bool {
        self.is_string() || self.is_number() || self.is_bool()
    }

    /// Borrow the number if this is a `Number`.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Borrow the text if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the mapping if this is an `Object`.
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    // ---- navigation ----

    /// The element at `index` of an array.
    ///
    /// Fails on a non-array and on an out-of-range index.
    pub fn at_index(&self, index: usize) -> JsonResult<&Value> {
        match self {
            Value::Array(items) => items
                .get(index)
                .ok_or(Error::unsupported("at(index): out of range", "array")),
            _ => Err(Error::unsupported("at(index)", self.type_name())),
        }
    }

    /// The field `key` of an object, or the null marker when absent.
    ///
    /// Absent fields are an expected condition ("optional field"), so
    /// this answers [`Value::NULL`] rather than failing; only calling it
    /// on a non-object fails.
    pub fn at(&self, key: &str) -> JsonResult<&Value> {
        match self {
            Value::Object(map) => Ok(map.get(key).unwrap_or(&Value::NULL)),
            _ => Err(Error::unsupported("at(key)", self.type_name())),
        }
    }

    /// The field `key` of an object, inserting `default` first when the
    /// field is absent.
    pub fn at_or(&mut self, key: &str, default: impl Into<Value>) -> JsonResult<&mut Value> {
        let variant = self.type_name();
        match self {
            Value::Object(map) => Ok(map.entry(key.to_string()).or_insert_with(|| default.into())),
            _ => Err(Error::unsupported("at(key, default)", variant)),
        }
    }

    /// True when an object has the field `key`. Never fails.
    pub fn has(&self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// True when an object's field `key` equals `value`. Never fails;
    /// a missing field or a non-object answers false.
    pub fn is_at(&self, key: &str, value: &Value) -> bool {
        match self {
            Value::Object(map) => map.get(key).is_some_and(|v| v == value),
            _ => false,
        }
    }

    /// True when an array's element at `index` equals `value`. Never
    /// fails; out-of-range or a non-array answers false.
    pub fn is_index(&self, index: usize, value: &Value) -> bool {
        match self {
            Value::Array(items) => items.get(index).is_some_and(|v| v == value),
            _ => false,
        }
    }

    /// Iterate an array's elements.
    pub fn elements(&self) -> JsonResult<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(Error::unsupported("elements", self.type_name())),
        }
    }

    /// Iterate an object's entries in insertion order.
    pub fn entries(&self) -> JsonResult<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(Error::unsupported("entries", self.type_name())),
        }
    }

    /// Number of children of an array or object. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// True when this value has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- mutation ----

    /// Append an element to an array.
    pub fn add(&mut self, value: impl Into<Value>) -> JsonResult<&mut Self> {
        match &mut *self {
            Value::Array(items) => items.push(value.into()),
            _ => return Err(Error::unsupported("add", self.type_name())),
        }
        Ok(self)
    }

    /// Remove the first structurally equal element from an array.
    /// Removing an element that is not present is not an error.
    pub fn remove(&mut self, value: &Value) -> JsonResult<&mut Self> {
        match &mut *self {
            Value::Array(items) => {
                if let Some(pos) = items.iter().position(|v| v == value) {
                    items.remove(pos);
                }
            }
            _ => return Err(Error::unsupported("remove", self.type_name())),
        }
        Ok(self)
    }

    /// Set a field of an object. An existing key keeps its position and
    /// takes the new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> JsonResult<&mut Self> {
        match &mut *self {
            Value::Object(map) => {
                map.insert(key.into(), value.into());
            }
            _ => return Err(Error::unsupported("set", self.type_name())),
        }
        Ok(self)
    }

    /// Remove a field from an object and return it, `None` when absent.
    pub fn at_del(&mut self, key: &str) -> JsonResult<Option<Value>> {
        match &mut *self {
            Value::Object(map) => Ok(map.shift_remove(key)),
            _ => Err(Error::unsupported("at_del(key)", self.type_name())),
        }
    }

    /// Remove the element at `index` from an array and return it.
    pub fn at_del_index(&mut self, index: usize) -> JsonResult<Value> {
        match &mut *self {
            Value::Array(items) => {
                if index < items.len() {
                    Ok(items.remove(index))
                } else {
                    Err(Error::unsupported("at_del(index): out of range", "array"))
                }
            }
            _ => Err(Error::unsupported("at_del(index)", self.type_name())),
        }
    }

    /// Remove a field from an object; fluent form returning the object.
    pub fn del_at(&mut self, key: &str) -> JsonResult<&mut Self> {
        self.at_del(key)?;
        Ok(self)
    }

    /// Remove the element at `index` from an array; fluent form.
    pub fn del_at_index(&mut self, index: usize) -> JsonResult<&mut Self> {
        self.at_del_index(index)?;
        Ok(self)
    }

    /// Combine with a same-variant value.
    ///
    /// For arrays, appends all of `other`'s elements in order. For
    /// objects, merges `other`'s fields into this one with `other`
    /// winning on key collision. Any other pairing fails.
    pub fn with(&mut self, other: Value) -> JsonResult<&mut Self> {
        match (&mut *self, other) {
            (Value::Array(items), Value::Array(more)) => items.extend(more),
            (Value::Object(map), Value::Object(more)) => {
                for (key, value) in more {
                    map.insert(key, value);
                }
            }
            _ => return Err(Error::unsupported("with", self.type_name())),
        }
        Ok(self)
    }

    /// Deep copy of this value, recursively duplicating children.
    pub fn duplicate(&self) -> Value {
        self.clone()
    }

    // ---- scalar narrowing ----

    /// The boolean value of a boolean.
    pub fn as_boolean(&self) -> JsonResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(Error::unsupported("as_boolean", self.type_name())),
        }
    }

    /// The text of a string, or the literal text of a number.
    pub fn as_string(&self) -> JsonResult<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(Error::unsupported("as_string", self.type_name())),
        }
    }

    /// Narrow to `i32`; strings parse their text.
    pub fn as_integer(&self) -> JsonResult<i32> {
        match self {
            Value::Number(n) => Ok(n.as_integer()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("integer", self.type_name())),
            _ => Err(Error::unsupported("as_integer", self.type_name())),
        }
    }

    /// Narrow to `i64`; strings parse their text.
    pub fn as_long(&self) -> JsonResult<i64> {
        match self {
            Value::Number(n) => Ok(n.as_long()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("long", self.type_name())),
            _ => Err(Error::unsupported("as_long", self.type_name())),
        }
    }

    /// Narrow to `i16`; strings parse their text.
    pub fn as_short(&self) -> JsonResult<i16> {
        match self {
            Value::Number(n) => Ok(n.as_short()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("short", self.type_name())),
            _ => Err(Error::unsupported("as_short", self.type_name())),
        }
    }

    /// Narrow to `i8`; strings parse their text.
    pub fn as_byte(&self) -> JsonResult<i8> {
        match self {
            Value::Number(n) => Ok(n.as_byte()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("byte", self.type_name())),
            _ => Err(Error::unsupported("as_byte", self.type_name())),
        }
    }

    /// Narrow to `f32`; strings parse their text.
    pub fn as_float(&self) -> JsonResult<f32> {
        match self {
            Value::Number(n) => Ok(n.as_float()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("float", self.type_name())),
            _ => Err(Error::unsupported("as_float", self.type_name())),
        }
    }

    /// Narrow to `f64`; strings parse their text.
    pub fn as_double(&self) -> JsonResult<f64> {
        match self {
            Value::Number(n) => Ok(n.as_double()),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::coercion("double", self.type_name())),
            _ => Err(Error::unsupported("as_double", self.type_name())),
        }
    }

    /// The first character of a string.
    pub fn as_char(&self) -> JsonResult<char> {
        match self {
            Value::String(s) => s
                .chars()
                .next()
                .ok_or(Error::coercion("character", "string")),
            _ => Err(Error::unsupported("as_char", self.type_name())),
        }
    }

    /// Rank of the variant's name, for cross-variant ordering ties.
    ///
    /// Lexicographic over the variant names, i.e.
    /// array < boolean < null < number < object < string.
    fn variant_rank(&self) -> u8 {
        match self {
            Value::Array(_) => 0,
            Value::Bool(_) => 1,
            Value::Null => 2,
            Value::Number(_) => 3,
            Value::Object(_) => 4,
            Value::String(_) => 5,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_escaped(f, s),
            Value::Array(items) => {
                f.write_str("[\n")?;
                let last = items.len().saturating_sub(1);
                for (i, value) in items.iter().enumerate() {
                    write_indent(f, depth + 1)?;
                    value.render(f, depth + 1)?;
                    if i != last {
                        f.write_str(",")?;
                    }
                    f.write_str("\n")?;
                }
                write_indent(f, depth)?;
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{\n")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",\n")?;
                    }
                    write_indent(f, depth + 1)?;
                    write_escaped(f, key)?;
                    f.write_str(": ")?;
                    value.render(f, depth + 1)?;
                }
                f.write_str("\n")?;
                write_indent(f, depth)?;
                f.write_str("}")
            }
        }
    }
}

/// One space per depth level.
fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(" ")?;
    }
    Ok(())
}

/// Double-quoted string literal escaping `"`, `\`, and control characters.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\x08' => f.write_str("\\b")?,
            '\x0C' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c < '\x20' => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Value {
    /// The recursive pretty printer: multi-line, one space of indent per
    /// nesting level, scalars as their literal form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl Ord for Value {
    /// Total order across all variants.
    ///
    /// Null-like values sort first and compare equal among themselves
    /// (the inherited convention: an empty string and `null` tie under
    /// ordering even though they are not structurally equal). Same
    /// variants compare by content; different variants fall back to the
    /// fixed variant-name precedence.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_null_like(), other.is_null_like()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match (self, other) {
                (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
                (Value::Number(a), Value::Number(b)) => a.cmp(b),
                (Value::String(a), Value::String(b)) => a.cmp(b),
                (Value::Array(a), Value::Array(b)) => a.cmp(b),
                (Value::Object(a), Value::Object(b)) => a.iter().cmp(b.iter()),
                _ => self.variant_rank().cmp(&other.variant_rank()),
            },
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---- wrap: host value to tree value ----

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Number(Number::from(v))
            }
        })*
    };
}

value_from_number!(i8, i16, i32, i64, u32, f32, f64);

impl From<num_bigint::BigInt> for Value {
    fn from(v: num_bigint::BigInt) -> Self {
        Value::Number(Number::BigInt(v))
    }
}

impl From<bigdecimal::BigDecimal> for Value {
    fn from(v: bigdecimal::BigDecimal) -> Self {
        Value::Number(Number::BigDec(v))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}
