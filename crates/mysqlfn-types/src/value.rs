use std::borrow::Cow;
use std::fmt;

use mysqlfn_error::{FuncError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::time::{Duration, Time};
use crate::{Bit, Hex, Opaque, SetValue};

/// A dynamically-typed MySQL scalar value.
///
/// Exactly one variant is active. Numeric variants carry no cached string
/// form; every string view is produced on demand by the coercion methods
/// below. Equality is structural: `Int64(1)` and `String("1")` are not equal.
/// Cross-kind comparison goes through a collation over [`Datum::to_bytes`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Datum {
    /// SQL NULL.
    Null,
    /// A signed 64-bit integer. Booleans enter as `Int64(1)` / `Int64(0)`.
    Int64(i64),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// A double-precision float.
    Float64(f64),
    /// An exact decimal.
    Decimal(Decimal),
    /// A character string (always valid UTF-8).
    String(String),
    /// A binary string.
    Bytes(Vec<u8>),
    /// DATE / DATETIME / TIMESTAMP.
    Time(Time),
    /// TIME.
    Duration(Duration),
    /// BIT(n).
    Bit(Bit),
    /// Hexadecimal literal.
    Hex(Hex),
    /// SET member list.
    Set(SetValue),
    /// Engine value with no scalar representation.
    Opaque(Opaque),
}

impl Datum {
    /// Returns true if this is a NULL value.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the active variant, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Int64(_) => "integer",
            Self::Uint64(_) => "unsigned integer",
            Self::Float64(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Bytes(_) => "binary string",
            Self::Time(_) => "datetime",
            Self::Duration(_) => "time",
            Self::Bit(_) => "bit",
            Self::Hex(_) => "hex literal",
            Self::Set(_) => "set",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Whether this value is string-kind: its string form is the value itself
    /// rather than a rendering of a number.
    pub const fn is_string_kind(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Bytes(_) | Self::Time(_) | Self::Duration(_) | Self::Set(_)
        )
    }

    /// Whether this value is a binary string: character positions in it
    /// count bytes, not code points.
    pub const fn is_binary_kind(&self) -> bool {
        matches!(self, Self::Bytes(_) | Self::Bit(_) | Self::Hex(_))
    }

    /// Wrap produced bytes as `String` when they are valid UTF-8, else `Bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => Self::String(s),
            Err(e) => Self::Bytes(e.into_bytes()),
        }
    }

    fn coercion_error(&self, to: &'static str) -> FuncError {
        FuncError::coercion(format!("{} {self}", self.kind_name()), to)
    }

    /// Canonical byte form, as seen by byte-oriented string functions.
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(match self {
            Self::Null | Self::Opaque(_) => return Err(self.coercion_error("string")),
            Self::Int64(i) => Cow::Owned(i.to_string().into_bytes()),
            Self::Uint64(u) => Cow::Owned(u.to_string().into_bytes()),
            Self::Float64(f) => Cow::Owned(format_float(*f).into_bytes()),
            Self::Decimal(d) => Cow::Owned(d.to_string().into_bytes()),
            Self::String(s) => Cow::Borrowed(s.as_bytes()),
            Self::Bytes(b) => Cow::Borrowed(b.as_slice()),
            Self::Time(t) => Cow::Owned(t.to_string().into_bytes()),
            Self::Duration(d) => Cow::Owned(d.to_string().into_bytes()),
            Self::Bit(b) => Cow::Owned(b.to_bytes()),
            Self::Hex(h) => Cow::Owned(h.to_bytes()),
            Self::Set(s) => Cow::Borrowed(s.name.as_bytes()),
        })
    }

    /// Canonical text form, for names and other arguments read as text.
    ///
    /// Invalid UTF-8 (binary strings, bit and hex literals) is replaced
    /// lossily with U+FFFD. Functions that produce a value from a binary
    /// string work on [`Datum::to_bytes`] instead.
    pub fn to_text(&self) -> Result<Cow<'_, str>> {
        if let Self::String(s) = self {
            return Ok(Cow::Borrowed(s));
        }
        Ok(match self.to_bytes()? {
            Cow::Borrowed(b) => String::from_utf8_lossy(b),
            Cow::Owned(v) => Cow::Owned(match String::from_utf8(v) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }),
        })
    }

    /// Lenient integer coercion.
    ///
    /// Numeric kinds round half away from zero and saturate at the `i64`
    /// bounds. Text must be a complete numeric literal once surrounding
    /// whitespace is trimmed; anything else is a coercion error.
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Self::Null | Self::Opaque(_) => Err(self.coercion_error("integer")),
            Self::Int64(i) => Ok(*i),
            Self::Uint64(u) => Ok(saturate_u64(*u)),
            Self::Float64(f) => {
                round_f64_to_i64(*f).ok_or_else(|| self.coercion_error("integer"))
            }
            Self::Decimal(d) => Ok(round_decimal_to_i64(*d)),
            Self::Time(t) => Ok(t.to_packed_i64()),
            Self::Duration(d) => Ok(d.to_packed_i64()),
            Self::Bit(b) => Ok(saturate_u64(b.value)),
            Self::Hex(h) => Ok(h.value),
            Self::Set(s) => Ok(saturate_u64(s.value)),
            Self::String(_) | Self::Bytes(_) => {
                let bytes = self.to_bytes()?;
                let exact = std::str::from_utf8(&bytes)
                    .ok()
                    .and_then(|s| s.trim().parse::<i64>().ok());
                if let Some(i) = exact {
                    return Ok(i);
                }
                // Fractional and exponent literals round like floats.
                self.to_f64()
                    .ok()
                    .and_then(round_f64_to_i64)
                    .ok_or_else(|| self.coercion_error("integer"))
            }
        }
    }

    /// Strict integer extraction for parameters that must be integer-kind.
    ///
    /// Only `Int64` and `Uint64` qualify; `Uint64` saturates at `i64::MAX`.
    pub const fn as_exact_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Uint64(u) => Some(saturate_u64(*u)),
            _ => None,
        }
    }

    /// Lenient float coercion. Text must be a complete numeric literal.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::Null | Self::Opaque(_) => Err(self.coercion_error("double")),
            Self::Int64(i) => Ok(*i as f64),
            Self::Uint64(u) => Ok(*u as f64),
            Self::Float64(f) => Ok(*f),
            Self::Decimal(d) => d.to_f64().ok_or_else(|| self.coercion_error("double")),
            Self::Time(t) => Ok(t.to_packed_i64() as f64),
            Self::Duration(d) => Ok(d.to_packed_i64() as f64),
            Self::Bit(b) => Ok(b.value as f64),
            Self::Hex(h) => Ok(h.value as f64),
            Self::Set(s) => Ok(s.value as f64),
            Self::String(_) | Self::Bytes(_) => {
                let bytes = self.to_bytes()?;
                std::str::from_utf8(&bytes)
                    .ok()
                    .and_then(|s| parse_float_literal(s.trim()))
                    .ok_or_else(|| self.coercion_error("double"))
            }
        }
    }
}

const fn saturate_u64(u: u64) -> i64 {
    if u > i64::MAX as u64 { i64::MAX } else { u as i64 }
}

/// Round half away from zero; `None` for NaN.
#[allow(clippy::cast_possible_truncation)]
pub fn round_f64_to_i64(f: f64) -> Option<i64> {
    if f.is_nan() {
        return None;
    }
    // `as` saturates at the i64 bounds.
    Some(f.round() as i64)
}

/// Round half away from zero, saturating at the `i64` bounds.
pub fn round_decimal_to_i64(d: Decimal) -> i64 {
    let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn parse_float_literal(s: &str) -> Option<f64> {
    // Rust accepts "inf"/"nan" spellings that are not SQL numeric literals.
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Shortest round-trip rendering without exponent; `1.0` renders as `1`.
pub fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_owned();
    }
    format!("{f}")
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Uint64(u) => write!(f, "{u}"),
            Self::Float64(v) => f.write_str(&format_float(*v)),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Bytes(b) => {
                f.write_str("X'")?;
                for byte in b {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Time(t) => write!(f, "'{t}'"),
            Self::Duration(d) => write!(f, "'{d}'"),
            Self::Bit(b) => write!(f, "b'{:b}'", b.value),
            Self::Hex(h) => write!(f, "0x{:X}", h.value),
            Self::Set(s) => write!(f, "'{}'", s.name),
            Self::Opaque(o) => write!(f, "{o}"),
        }
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Datum {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<u64> for Datum {
    fn from(u: u64) -> Self {
        Self::Uint64(u)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Self::Int64(i64::from(b))
    }
}

impl From<f64> for Datum {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<Decimal> for Datum {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<u8>> for Datum {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Datum {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Time> for Datum {
    fn from(t: Time) -> Self {
        Self::Time(t)
    }
}

impl From<Duration> for Datum {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<Bit> for Datum {
    fn from(b: Bit) -> Self {
        Self::Bit(b)
    }
}

impl From<Hex> for Datum {
    fn from(h: Hex) -> Self {
        Self::Hex(h)
    }
}

impl From<SetValue> for Datum {
    fn from(s: SetValue) -> Self {
        Self::Set(s)
    }
}

impl From<Opaque> for Datum {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

impl<T: Into<Self>> From<Option<T>> for Datum {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
