//! Built-in MySQL string scalar functions.
//!
//! Every function follows one NULL discipline: a NULL in a required argument
//! yields `Ok(Datum::Null)`. The exceptions are CONCAT_WS (NULL elements are
//! skipped), TRIM (a NULL strip string means whitespace) and SUBSTRING_INDEX
//! (NULL input is an error).
//!
//! Character positions are resolved through [`crate::index`]. They count
//! code points, except in binary strings (`Bytes`, `Bit`, `Hex`) where every
//! byte is one character. Byte-oriented functions (LENGTH, ASCII, CONCAT,
//! REPEAT, REPLACE, HEX) work on [`Datum::to_bytes`]. Any function that can
//! return binary content wraps it with [`Datum::from_bytes`].
#![allow(
    clippy::unnecessary_literal_bound,
    clippy::too_many_lines,
    clippy::cast_sign_loss,
    clippy::match_same_arms
)]

use mysqlfn_error::{FuncError, Result};
use mysqlfn_types::value::{round_decimal_to_i64, round_f64_to_i64};
use mysqlfn_types::{Datum, EvalContext, charset};
use tracing::debug;

use crate::collation::{BinaryCollation, CollationFunction};
use crate::index::{clamp_count, locate_start, resolve_length, resolve_start};
use crate::{Arity, FunctionRegistry, ScalarFunction};

// ── Helpers ───────────────────────────────────────────────────────────────

/// Standard NULL propagation: if any arg is NULL, return NULL.
fn null_propagate(args: &[Datum]) -> Option<Datum> {
    if args.iter().any(Datum::is_null) {
        Some(Datum::Null)
    } else {
        None
    }
}

fn int_result(n: usize) -> Datum {
    Datum::Int64(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Integer argument that must already be integer-kind (no text parsing).
fn exact_int(arg: &Datum) -> Result<i64> {
    arg.as_exact_i64()
        .ok_or_else(|| FuncError::coercion(format!("{} {arg}", arg.kind_name()), "integer"))
}

/// Whether a result of `len` bytes fits under `max_allowed_packet`. A `None`
/// length means the computation overflowed.
fn within_packet(cx: &EvalContext, function: &'static str, len: Option<u64>) -> bool {
    let limit = cx.limits().max_allowed_packet;
    match len {
        Some(len) if cx.limits().admits(len) => true,
        _ => {
            debug!(
                function,
                bytes = ?len,
                limit,
                "result exceeds max_allowed_packet, returning NULL"
            );
            false
        }
    }
}

fn find<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ── Character units ──────────────────────────────────────────────────────

/// One counted position of a string: a code point, or a byte of a binary
/// string.
trait Unit: Copy + PartialEq {
    /// Bytes this unit occupies in a result.
    fn width(self) -> u64;

    fn is_trim_space(self) -> bool;

    fn to_datum(units: &[Self]) -> Datum;
}

impl Unit for char {
    fn width(self) -> u64 {
        self.len_utf8() as u64
    }

    fn is_trim_space(self) -> bool {
        matches!(self, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
    }

    fn to_datum(units: &[Self]) -> Datum {
        Datum::String(units.iter().collect())
    }
}

impl Unit for u8 {
    fn width(self) -> u64 {
        1
    }

    fn is_trim_space(self) -> bool {
        matches!(self, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
    }

    fn to_datum(units: &[Self]) -> Datum {
        Datum::from_bytes(units.to_vec())
    }
}

fn width<T: Unit>(units: &[T]) -> u64 {
    units.iter().map(|u| u.width()).sum()
}

/// A string argument split into units.
///
/// Binary kinds count bytes, as does any coerced form that is not valid
/// UTF-8. Everything else counts code points.
enum Units {
    Chars(Vec<char>),
    Bytes(Vec<u8>),
}

impl Units {
    fn of(arg: &Datum) -> Result<Self> {
        let bytes = arg.to_bytes()?;
        let text = if arg.is_binary_kind() {
            None
        } else {
            std::str::from_utf8(&bytes).ok()
        };
        Ok(match text {
            Some(s) => Self::Chars(s.chars().collect()),
            None => Self::Bytes(bytes.to_vec()),
        })
    }

    fn len(&self) -> usize {
        match self {
            Self::Chars(c) => c.len(),
            Self::Bytes(b) => b.len(),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Chars(c) => c.into_iter().collect::<String>().into_bytes(),
            Self::Bytes(b) => b,
        }
    }
}

/// Two string arguments split into the same kind of unit: if either one is
/// binary, both count bytes.
enum UnitPair {
    Chars(Vec<char>, Vec<char>),
    Bytes(Vec<u8>, Vec<u8>),
}

impl UnitPair {
    fn of(a: &Datum, b: &Datum) -> Result<Self> {
        Ok(match (Units::of(a)?, Units::of(b)?) {
            (Units::Chars(a), Units::Chars(b)) => Self::Chars(a, b),
            (a, b) => Self::Bytes(a.into_bytes(), b.into_bytes()),
        })
    }
}

/// Evaluate `$body` with `$u` bound to the unit slice of a [`Units`].
macro_rules! with_units {
    ($units:expr, |$u:ident| $body:expr) => {
        match $units {
            Units::Chars($u) => $body,
            Units::Bytes($u) => $body,
        }
    };
}

/// Evaluate `$body` with `$a`, `$b` bound to the unit slices of a [`UnitPair`].
macro_rules! with_unit_pair {
    ($pair:expr, |$a:ident, $b:ident| $body:expr) => {
        match $pair {
            UnitPair::Chars($a, $b) => $body,
            UnitPair::Bytes($a, $b) => $body,
        }
    };
}

// ── length(X) / octet_length(X) ──────────────────────────────────────────

pub struct LengthFunc;

impl ScalarFunction for LengthFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        Ok(int_result(args[0].to_bytes()?.len()))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "length"
    }
}

// ── char_length(X) ───────────────────────────────────────────────────────

pub struct CharLengthFunc;

impl ScalarFunction for CharLengthFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        Ok(int_result(Units::of(&args[0])?.len()))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "char_length"
    }
}

// ── ascii(X) ─────────────────────────────────────────────────────────────

pub struct AsciiFunc;

impl ScalarFunction for AsciiFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let first = args[0].to_bytes()?.first().copied().unwrap_or(0);
        Ok(Datum::Int64(i64::from(first)))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "ascii"
    }
}

// ── concat(X, Y, ...) ────────────────────────────────────────────────────

pub struct ConcatFunc;

impl ScalarFunction for ConcatFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let mut out = Vec::new();
        for arg in args {
            out.extend_from_slice(&arg.to_bytes()?);
        }
        Ok(Datum::from_bytes(out))
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn name(&self) -> &str {
        "concat"
    }
}

// ── concat_ws(SEP, X, Y, ...) ────────────────────────────────────────────

pub struct ConcatWsFunc;

impl ScalarFunction for ConcatWsFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let sep = args[0].to_bytes()?;
        let mut out = Vec::new();
        let mut first = true;
        // NULL elements are skipped entirely, separator included.
        for arg in args[1..].iter().filter(|a| !a.is_null()) {
            if !first {
                out.extend_from_slice(&sep);
            }
            out.extend_from_slice(&arg.to_bytes()?);
            first = false;
        }
        Ok(Datum::from_bytes(out))
    }

    fn arity(&self) -> Arity {
        Arity::at_least(2)
    }

    fn name(&self) -> &str {
        "concat_ws"
    }
}

// ── left(X, N) / right(X, N) ─────────────────────────────────────────────

pub struct LeftFunc;
pub struct RightFunc;

impl ScalarFunction for LeftFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let units = Units::of(&args[0])?;
        let n = clamp_count(args[1].to_i64()?);
        Ok(with_units!(units, |u| Unit::to_datum(&u[..n.min(u.len())])))
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "left"
    }
}

impl ScalarFunction for RightFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let units = Units::of(&args[0])?;
        let n = clamp_count(args[1].to_i64()?);
        Ok(with_units!(units, |u| Unit::to_datum(&u[u.len().saturating_sub(n)..])))
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "right"
    }
}

// ── repeat(X, N) ─────────────────────────────────────────────────────────

pub struct RepeatFunc;

impl ScalarFunction for RepeatFunc {
    fn invoke(&self, args: &[Datum], cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let s = args[0].to_bytes()?;
        let n = clamp_count(args[1].to_i64()?);
        if n == 0 || s.is_empty() {
            return Ok(Datum::String(String::new()));
        }
        let total = (s.len() as u64).checked_mul(n as u64);
        if !within_packet(cx, "repeat", total) {
            return Ok(Datum::Null);
        }
        Ok(Datum::from_bytes(s.repeat(n)))
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "repeat"
    }
}

// ── lower(X) / upper(X) ──────────────────────────────────────────────────

pub struct LowerFunc;
pub struct UpperFunc;

impl ScalarFunction for LowerFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        match &args[0] {
            Datum::Null => Ok(Datum::Null),
            // Binary strings fold ASCII letters only.
            arg if arg.is_binary_kind() => {
                Ok(Datum::from_bytes(arg.to_bytes()?.to_ascii_lowercase()))
            }
            arg => Ok(Datum::String(arg.to_text()?.to_lowercase())),
        }
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "lower"
    }
}

impl ScalarFunction for UpperFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        match &args[0] {
            Datum::Null => Ok(Datum::Null),
            arg if arg.is_binary_kind() => {
                Ok(Datum::from_bytes(arg.to_bytes()?.to_ascii_uppercase()))
            }
            arg => Ok(Datum::String(arg.to_text()?.to_uppercase())),
        }
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "upper"
    }
}

// ── reverse(X) ───────────────────────────────────────────────────────────

pub struct ReverseFunc;

impl ScalarFunction for ReverseFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        Ok(with_units!(Units::of(&args[0])?, |u| {
            let reversed: Vec<_> = u.into_iter().rev().collect();
            Unit::to_datum(&reversed[..])
        }))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "reverse"
    }
}

// ── strcmp(X, Y) ─────────────────────────────────────────────────────────

pub struct StrcmpFunc;

impl ScalarFunction for StrcmpFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let ord = BinaryCollation.compare(&args[0].to_bytes()?, &args[1].to_bytes()?);
        Ok(Datum::Int64(ord as i64))
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "strcmp"
    }
}

// ── replace(X, FROM, TO) ─────────────────────────────────────────────────

pub struct ReplaceFunc;

impl ScalarFunction for ReplaceFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let s = args[0].to_bytes()?;
        let from = args[1].to_bytes()?;
        let to = args[2].to_bytes()?;
        if from.is_empty() {
            return Ok(Datum::from_bytes(s.into_owned()));
        }
        let mut out = Vec::with_capacity(s.len());
        let mut rest: &[u8] = &s;
        while let Some(i) = find(rest, &*from) {
            out.extend_from_slice(&rest[..i]);
            out.extend_from_slice(&to);
            rest = &rest[i + from.len()..];
        }
        out.extend_from_slice(rest);
        Ok(Datum::from_bytes(out))
    }

    fn arity(&self) -> Arity {
        Arity::exact(3)
    }

    fn name(&self) -> &str {
        "replace"
    }
}

// ── substring(X, POS [, LEN]) / substr() / mid() ─────────────────────────

pub struct SubstringFunc;

impl ScalarFunction for SubstringFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let units = Units::of(&args[0])?;
        let pos = exact_int(&args[1])?;
        let len = args.get(2).map(exact_int).transpose()?;
        Ok(with_units!(units, |u| substring(&u, pos, len)))
    }

    fn arity(&self) -> Arity {
        Arity::range(2, 3)
    }

    fn name(&self) -> &str {
        "substring"
    }
}

fn substring<T: Unit>(s: &[T], pos: i64, len: Option<i64>) -> Datum {
    let Some(start) = resolve_start(s.len(), pos) else {
        return Datum::String(String::new());
    };
    let take = resolve_length(s.len() - start, len);
    T::to_datum(&s[start..start + take])
}

// ── substring_index(X, DELIM, COUNT) ─────────────────────────────────────

pub struct SubstringIndexFunc;

impl ScalarFunction for SubstringIndexFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(position) = args.iter().position(Datum::is_null) {
            return Err(FuncError::NullArgument {
                function: "substring_index",
                position: position + 1,
            });
        }
        let s = args[0].to_bytes()?;
        let delim = args[1].to_bytes()?;
        let count = args[2].to_i64()?;
        if s.is_empty() || delim.is_empty() || count == 0 {
            return Ok(Datum::String(String::new()));
        }

        // Non-overlapping occurrences, scanned left to right.
        let mut hits = Vec::new();
        let mut from = 0;
        while let Some(i) = find(&s[from..], &*delim) {
            hits.push(from + i);
            from += i + delim.len();
        }

        let wanted = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
        if wanted > hits.len() {
            return Ok(Datum::from_bytes(s.into_owned()));
        }
        let out = if count > 0 {
            &s[..hits[wanted - 1]]
        } else {
            &s[hits[hits.len() - wanted] + delim.len()..]
        };
        Ok(Datum::from_bytes(out.to_vec()))
    }

    fn arity(&self) -> Arity {
        Arity::exact(3)
    }

    fn name(&self) -> &str {
        "substring_index"
    }
}

// ── convert(X USING CHARSET) ─────────────────────────────────────────────

pub struct ConvertFunc;

impl ScalarFunction for ConvertFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[1].is_null() {
            return Ok(Datum::Null);
        }
        let name = args[1].to_text()?;
        let cs = charset::lookup(&name).ok_or_else(|| FuncError::unknown_charset(&*name))?;
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let bytes = args[0].to_bytes()?.into_owned();
        if cs.is_binary() {
            Ok(Datum::Bytes(bytes))
        } else {
            Ok(Datum::from_bytes(bytes))
        }
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "convert"
    }
}

// ── space(N) ─────────────────────────────────────────────────────────────

pub struct SpaceFunc;

impl ScalarFunction for SpaceFunc {
    fn invoke(&self, args: &[Datum], cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let n = clamp_count(args[0].to_i64()?);
        if !within_packet(cx, "space", Some(n as u64)) {
            return Ok(Datum::Null);
        }
        Ok(Datum::String(" ".repeat(n)))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "space"
    }
}

// ── locate(SUB, X [, POS]) / instr(X, SUB) ───────────────────────────────

pub struct LocateFunc;
pub struct InstrFunc;

/// 1-based character position of `sub` in `s` at or after `pos`, 0 if none.
fn locate(sub: &Datum, s: &Datum, pos: i64) -> Result<Datum> {
    Ok(with_unit_pair!(UnitPair::of(sub, s)?, |sub, s| {
        locate_units(&sub, &s, pos)
    }))
}

fn locate_units<T: PartialEq>(sub: &[T], s: &[T], pos: i64) -> Datum {
    let Some(start) = locate_start(s.len(), pos) else {
        return Datum::Int64(0);
    };
    if start + sub.len() > s.len() {
        return Datum::Int64(0);
    }
    match find(&s[start..], sub) {
        Some(i) => int_result(start + i + 1),
        None => Datum::Int64(0),
    }
}

impl ScalarFunction for LocateFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        let pos = match args.get(2) {
            Some(p) => p.to_i64()?,
            None => 1,
        };
        locate(&args[0], &args[1], pos)
    }

    fn arity(&self) -> Arity {
        Arity::range(2, 3)
    }

    fn name(&self) -> &str {
        "locate"
    }
}

impl ScalarFunction for InstrFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if let Some(null) = null_propagate(args) {
            return Ok(null);
        }
        locate(&args[1], &args[0], 1)
    }

    fn arity(&self) -> Arity {
        Arity::exact(2)
    }

    fn name(&self) -> &str {
        "instr"
    }
}

// ── trim/ltrim/rtrim ─────────────────────────────────────────────────────

/// Which end(s) `TRIM` strips, as encoded in its optional third argument.
///
/// The parser lowers `TRIM([BOTH | LEADING | TRAILING] [remstr] FROM str)`
/// into `trim(str, remstr, direction)` with the direction as an `Int64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrimDirection {
    /// No direction keyword was written; strips both ends.
    #[default]
    BothDefault,
    Both,
    Leading,
    Trailing,
}

impl TrimDirection {
    /// The `Int64` encoding passed as TRIM's third argument.
    pub const fn code(self) -> i64 {
        match self {
            Self::BothDefault => 0,
            Self::Both => 1,
            Self::Leading => 2,
            Self::Trailing => 3,
        }
    }

    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::BothDefault),
            1 => Some(Self::Both),
            2 => Some(Self::Leading),
            3 => Some(Self::Trailing),
            _ => None,
        }
    }

    const fn strips_leading(self) -> bool {
        !matches!(self, Self::Trailing)
    }

    const fn strips_trailing(self) -> bool {
        !matches!(self, Self::Leading)
    }
}

impl From<TrimDirection> for Datum {
    fn from(d: TrimDirection) -> Self {
        Self::Int64(d.code())
    }
}

/// Strip whitespace, or repeated whole occurrences of `pat` when it is
/// non-empty.
fn trim<'a, T: Unit>(s: &'a [T], pat: &[T], dir: TrimDirection) -> &'a [T] {
    let mut s = s;
    if pat.is_empty() {
        if dir.strips_leading() {
            let n = s.iter().take_while(|u| u.is_trim_space()).count();
            s = &s[n..];
        }
        if dir.strips_trailing() {
            let n = s.iter().rev().take_while(|u| u.is_trim_space()).count();
            s = &s[..s.len() - n];
        }
        return s;
    }
    if dir.strips_leading() {
        while let Some(rest) = s.strip_prefix(pat) {
            s = rest;
        }
    }
    if dir.strips_trailing() {
        while let Some(rest) = s.strip_suffix(pat) {
            s = rest;
        }
    }
    s
}

pub struct TrimFunc;
pub struct LtrimFunc;
pub struct RtrimFunc;

impl ScalarFunction for TrimFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let dir = match args.get(2) {
            None | Some(Datum::Null) => TrimDirection::BothDefault,
            Some(d) => TrimDirection::from_code(exact_int(d)?).ok_or_else(|| {
                FuncError::coercion(format!("{} {d}", d.kind_name()), "trim direction")
            })?,
        };
        // A NULL strip string means whitespace.
        Ok(match args.get(1).filter(|r| !r.is_null()) {
            Some(remstr) => with_unit_pair!(UnitPair::of(&args[0], remstr)?, |s, pat| {
                Unit::to_datum(trim(&s, &pat, dir))
            }),
            None => with_units!(Units::of(&args[0])?, |s| {
                Unit::to_datum(trim(&s, &[], dir))
            }),
        })
    }

    fn arity(&self) -> Arity {
        Arity::range(1, 3)
    }

    fn name(&self) -> &str {
        "trim"
    }
}

impl ScalarFunction for LtrimFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        Ok(with_units!(Units::of(&args[0])?, |s| {
            Unit::to_datum(trim(&s, &[], TrimDirection::Leading))
        }))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "ltrim"
    }
}

impl ScalarFunction for RtrimFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        Ok(with_units!(Units::of(&args[0])?, |s| {
            Unit::to_datum(trim(&s, &[], TrimDirection::Trailing))
        }))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "rtrim"
    }
}

// ── hex(X) / unhex(X) ────────────────────────────────────────────────────

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub struct HexFunc;

impl ScalarFunction for HexFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        let arg = &args[0];
        if arg.is_null() {
            return Ok(Datum::Null);
        }
        // String kinds print their bytes.
        if arg.is_string_kind() {
            let bytes = arg.to_bytes()?;
            let mut out = String::with_capacity(bytes.len() * 2);
            for b in bytes.iter() {
                out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
            }
            return Ok(Datum::String(out));
        }
        // Numbers print the hex of their rounded value, two's complement for
        // negatives.
        let not_integer = || {
            FuncError::coercion(format!("{} {arg}", arg.kind_name()), "integer")
        };
        let value: u64 = match arg {
            Datum::Int64(i) => *i as u64,
            Datum::Uint64(u) => *u,
            Datum::Float64(f) => round_f64_to_i64(*f).ok_or_else(not_integer)? as u64,
            Datum::Decimal(d) => round_decimal_to_i64(*d) as u64,
            Datum::Bit(b) => b.value,
            Datum::Hex(h) => h.value as u64,
            _ => return Err(not_integer()),
        };
        Ok(Datum::String(format!("{value:X}")))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "hex"
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

pub struct UnhexFunc;

impl ScalarFunction for UnhexFunc {
    fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
        if args[0].is_null() {
            return Ok(Datum::Null);
        }
        let input = args[0].to_bytes()?;
        if input.len() % 2 != 0 {
            return Ok(Datum::Null);
        }
        let mut out = Vec::with_capacity(input.len() / 2);
        for pair in input.chunks_exact(2) {
            match (hex_digit(pair[0]), hex_digit(pair[1])) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => return Ok(Datum::Null),
            }
        }
        Ok(Datum::Bytes(out))
    }

    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn name(&self) -> &str {
        "unhex"
    }
}

// ── rpad(X, LEN, PAD) / lpad(X, LEN, PAD) ────────────────────────────────

pub struct RpadFunc;
pub struct LpadFunc;

/// Shared body of RPAD and LPAD: truncate or pad `args[0]` to `args[1]`
/// characters with repetitions of `args[2]`.
fn pad(args: &[Datum], cx: &EvalContext, function: &'static str, left: bool) -> Result<Datum> {
    if let Some(null) = null_propagate(args) {
        return Ok(null);
    }
    let units = UnitPair::of(&args[0], &args[2])?;
    let target = args[1].to_i64()?;
    if target < 0 {
        return Ok(Datum::Null);
    }
    let target = clamp_count(target);
    Ok(with_unit_pair!(units, |s, fill| {
        pad_units(&s, target, &fill, cx, function, left)
    }))
}

fn pad_units<T: Unit>(
    s: &[T],
    target: usize,
    fill: &[T],
    cx: &EvalContext,
    function: &'static str,
    left: bool,
) -> Datum {
    if target <= s.len() {
        return T::to_datum(&s[..target]);
    }
    if fill.is_empty() {
        return Datum::Null;
    }

    // Size the result exactly before allocating anything.
    let need = target - s.len();
    let (full, rem) = (need / fill.len(), need % fill.len());
    let total = (full as u64)
        .checked_mul(width(fill))
        .and_then(|n| n.checked_add(width(&fill[..rem])))
        .and_then(|n| n.checked_add(width(s)));
    if !within_packet(cx, function, total) {
        return Datum::Null;
    }

    let mut padding = fill.repeat(full);
    padding.extend_from_slice(&fill[..rem]);
    let out = if left {
        [padding.as_slice(), s].concat()
    } else {
        [s, padding.as_slice()].concat()
    };
    T::to_datum(&out)
}

impl ScalarFunction for RpadFunc {
    fn invoke(&self, args: &[Datum], cx: &EvalContext) -> Result<Datum> {
        pad(args, cx, "rpad", false)
    }

    fn arity(&self) -> Arity {
        Arity::exact(3)
    }

    fn name(&self) -> &str {
        "rpad"
    }
}

impl ScalarFunction for LpadFunc {
    fn invoke(&self, args: &[Datum], cx: &EvalContext) -> Result<Datum> {
        pad(args, cx, "lpad", true)
    }

    fn arity(&self) -> Arity {
        Arity::exact(3)
    }

    fn name(&self) -> &str {
        "lpad"
    }
}

// ── Register all built-ins ───────────────────────────────────────────────

/// Alternate names, as `(alias, target)`.
const ALIASES: &[(&str, &str)] = &[
    ("octet_length", "length"),
    ("character_length", "char_length"),
    ("lcase", "lower"),
    ("ucase", "upper"),
    ("substr", "substring"),
    ("mid", "substring"),
];

/// Register every builtin string function and its aliases.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    // Length and inspection
    registry.register_scalar(LengthFunc);
    registry.register_scalar(CharLengthFunc);
    registry.register_scalar(AsciiFunc);
    registry.register_scalar(StrcmpFunc);
    registry.register_scalar(LocateFunc);
    registry.register_scalar(InstrFunc);

    // Construction
    registry.register_scalar(ConcatFunc);
    registry.register_scalar(ConcatWsFunc);
    registry.register_scalar(RepeatFunc);
    registry.register_scalar(SpaceFunc);
    registry.register_scalar(RpadFunc);
    registry.register_scalar(LpadFunc);

    // Extraction
    registry.register_scalar(LeftFunc);
    registry.register_scalar(RightFunc);
    registry.register_scalar(SubstringFunc);
    registry.register_scalar(SubstringIndexFunc);

    // Transformation
    registry.register_scalar(LowerFunc);
    registry.register_scalar(UpperFunc);
    registry.register_scalar(ReverseFunc);
    registry.register_scalar(ReplaceFunc);
    registry.register_scalar(TrimFunc);
    registry.register_scalar(LtrimFunc);
    registry.register_scalar(RtrimFunc);
    registry.register_scalar(ConvertFunc);

    // Encoding
    registry.register_scalar(HexFunc);
    registry.register_scalar(UnhexFunc);

    for (alias, target) in ALIASES {
        registry.register_alias(alias, target);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
