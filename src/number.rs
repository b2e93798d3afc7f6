//! Numeric payload of a JSON number.
//!
//! A literal parses into one of four representations chosen by the
//! tokenizer's digit-count heuristic: `i64`, `f64`, arbitrary-precision
//! integer, or arbitrary-precision decimal. Equality and ordering act on
//! the numeric value itself, not the representation, so `Long(1)`,
//! `Double(1.0)` and `BigDec(1.00)` are all equal. No tolerance or ULP
//! comparison is applied anywhere.

use std::cmp::Ordering;
use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

/// An arbitrary-precision-capable JSON number.
#[derive(Debug, Clone)]
pub enum Number {
    /// Fixed-width integral literal (fewer than 20 digits).
    Long(i64),
    /// Fixed-width fractional literal (fewer than 17 digits).
    Double(f64),
    /// Integral literal too wide for `i64`.
    BigInt(BigInt),
    /// Fractional literal too wide for `f64`.
    BigDec(BigDecimal),
}

impl Number {
    /// True for the integral representations.
    pub fn is_integral(&self) -> bool {
        matches!(self, Number::Long(_) | Number::BigInt(_))
    }

    /// Exact decimal form of this number.
    ///
    /// `None` only for a non-finite `Double`, which valid JSON text can
    /// never produce but a wrapped host value can.
    pub fn to_decimal(&self) -> Option<BigDecimal> {
        match self {
            Number::Long(v) => Some(BigDecimal::from(*v)),
            Number::Double(v) => BigDecimal::try_from(*v).ok(),
            Number::BigInt(v) => Some(BigDecimal::from(v.clone())),
            Number::BigDec(v) => Some(v.clone()),
        }
    }

    /// Narrow to `i64`, truncating fractions and wrapping wide integers
    /// to their low-order 64 bits.
    pub fn as_long(&self) -> i64 {
        match self {
            Number::Long(v) => *v,
            Number::Double(v) => *v as i64,
            Number::BigInt(v) => v.to_i64().unwrap_or_else(|| low_bits(v)),
            Number::BigDec(v) => v
                .to_i64()
                .unwrap_or_else(|| v.to_f64().unwrap_or(0.0) as i64),
        }
    }

    /// Narrow to `f64`, possibly losing precision.
    pub fn as_double(&self) -> f64 {
        match self {
            Number::Long(v) => *v as f64,
            Number::Double(v) => *v,
            Number::BigInt(v) => v.to_f64().unwrap_or(f64::NAN),
            Number::BigDec(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Narrow to `i32` through the `i64` form.
    pub fn as_integer(&self) -> i32 {
        self.as_long() as i32
    }

    /// Narrow to `i16` through the `i64` form.
    pub fn as_short(&self) -> i16 {
        self.as_long() as i16
    }

    /// Narrow to `i8` through the `i64` form.
    pub fn as_byte(&self) -> i8 {
        self.as_long() as i8
    }

    /// Narrow to `f32` through the `f64` form.
    pub fn as_float(&self) -> f32 {
        self.as_double() as f32
    }
}

/// Low-order 64 bits of a wide integer, two's-complement style.
fn low_bits(v: &BigInt) -> i64 {
    let low = v.iter_u64_digits().next().unwrap_or(0) as i64;
    if v.sign() == Sign::Minus {
        low.wrapping_neg()
    } else {
        low
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_decimal(), other.to_decimal()) {
            (Some(a), Some(b)) => a == b,
            // Non-finite doubles: bitwise-total comparison keeps eq reflexive.
            (None, None) => match (self, other) {
                (Number::Double(a), Number::Double(b)) => a.total_cmp(b) == Ordering::Equal,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.to_decimal(), other.to_decimal()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.as_double().total_cmp(&other.as_double()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Long(v) => write!(f, "{v}"),
            // Debug formatting keeps a trailing `.0` on integral doubles,
            // so a re-parse classifies the literal as fractional again.
            Number::Double(v) => write!(f, "{v:?}"),
            Number::BigInt(v) => write!(f, "{v}"),
            Number::BigDec(v) => write!(f, "{v}"),
        }
    }
}

impl From<i8> for Number {
    fn from(v: i8) -> Self {
        Number::Long(v as i64)
    }
}

impl From<i16> for Number {
    fn from(v: i16) -> Self {
        Number::Long(v as i64)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Long(v as i64)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Long(v)
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Number::Long(v as i64)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Double(v as f64)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Double(v)
    }
}

impl From<BigInt> for Number {
    fn from(v: BigInt) -> Self {
        Number::BigInt(v)
    }
}

impl From<BigDecimal> for Number {
    fn from(v: BigDecimal) -> Self {
        Number::BigDec(v)
    }
}
