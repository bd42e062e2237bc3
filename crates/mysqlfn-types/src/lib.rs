//! Value model and coercion rules shared by every mysqlfn builtin.
//!
//! The central type is [`Datum`], a closed tagged union over every SQL
//! scalar kind a MySQL-compatible engine hands to a scalar function. This
//! crate also owns the small literal types carried inside a `Datum`
//! ([`Bit`], [`Hex`], [`SetValue`], [`Opaque`]), the temporal types in
//! [`time`], the per-session [`EvalContext`] and its [`FunctionLimits`].

pub mod charset;
pub mod cx;
pub mod limits;
pub mod time;
pub mod value;

pub use charset::Charset;
pub use cx::EvalContext;
pub use limits::FunctionLimits;
pub use time::{Duration, Time, TimeType};
pub use value::Datum;

use std::fmt;

/// A `BIT(width)` value, e.g. the literal `b'1'`.
///
/// Renders as `ceil(width / 8)` big-endian bytes in string context and as
/// its unsigned value in numeric context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bit {
    /// The bit pattern, right-aligned.
    pub value: u64,
    /// Declared width in bits (1..=64).
    pub width: u8,
}

impl Bit {
    /// Create a bit value, clamping `width` to `1..=64`.
    pub fn new(value: u64, width: u8) -> Self {
        Self {
            value,
            width: width.clamp(1, 64),
        }
    }

    /// Number of bytes in the string rendering.
    pub fn byte_len(self) -> usize {
        usize::from(self.width.clamp(1, 64)).div_ceil(8)
    }

    /// Big-endian bytes, `byte_len()` long.
    pub fn to_bytes(self) -> Vec<u8> {
        let all = self.value.to_be_bytes();
        all[all.len() - self.byte_len()..].to_vec()
    }
}

/// A hexadecimal literal such as `0x4D` or `X'4D'`.
///
/// Renders as the minimal big-endian byte string of its value (at least one
/// byte) in string context and as an integer in numeric context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hex {
    pub value: i64,
}

impl Hex {
    /// Minimal big-endian bytes of the value.
    #[allow(clippy::cast_sign_loss)]
    pub fn to_bytes(self) -> Vec<u8> {
        let all = (self.value as u64).to_be_bytes();
        let skip = all
            .iter()
            .take(all.len() - 1)
            .take_while(|b| **b == 0)
            .count();
        all[skip..].to_vec()
    }
}

/// A `SET` column value: the member bitmap plus its rendered member list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SetValue {
    /// Member bitmap.
    pub value: u64,
    /// Comma-separated member names.
    pub name: String,
}

impl SetValue {
    pub fn new(value: u64, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }
}

/// A value the outer engine carries that has no scalar representation
/// (row constructors, geometry handles, evaluation errors).
///
/// Every coercion of an `Opaque` fails with a type-coercion error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Opaque {
    /// Engine-side type name, used in error messages.
    pub type_name: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}
