//! Collation callback trait and the binary collation used by STRCMP.
//!
//! Collations are pure comparators over the canonical byte form of a value
//! ([`Datum::to_bytes`](mysqlfn_types::Datum::to_bytes)). Values of
//! different kinds are only ever compared through a collation.
//!
//! # Contract
//!
//! Implementations must be deterministic and antisymmetric, and must define
//! a total order.
#![allow(clippy::unnecessary_literal_bound)]

use std::cmp::Ordering;

/// A collation comparator.
pub trait CollationFunction: Send + Sync {
    /// Collation name (for `COLLATE name`).
    fn name(&self) -> &str;

    /// Compare two byte strings.
    fn compare(&self, left: &[u8], right: &[u8]) -> Ordering;
}

/// `binary` collation: byte-by-byte comparison with no case or accent
/// folding. A proper prefix sorts first.
pub struct BinaryCollation;

impl CollationFunction for BinaryCollation {
    fn name(&self) -> &str {
        "binary"
    }

    fn compare(&self, left: &[u8], right: &[u8]) -> Ordering {
        left.cmp(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_basic() {
        let c = BinaryCollation;
        assert_eq!(c.compare(b"abc", b"abd"), Ordering::Less);
        assert_eq!(c.compare(b"abc", b"abc"), Ordering::Equal);
        assert_eq!(c.compare(b"b", b"a"), Ordering::Greater);
    }

    #[test]
    fn test_binary_case_sensitive() {
        // 'A' is 0x41, 'a' is 0x61.
        assert_eq!(BinaryCollation.compare(b"A", b"a"), Ordering::Less);
    }

    #[test]
    fn test_binary_prefix_first() {
        assert_eq!(BinaryCollation.compare(b"", b"123"), Ordering::Less);
        assert_eq!(BinaryCollation.compare(b"123", b"2"), Ordering::Less);
    }

    #[test]
    fn test_binary_antisymmetric() {
        let pairs: [(&[u8], &[u8]); 3] = [(b"x", b"y"), (b"", b"a"), (b"\xff", b"\x00")];
        for (l, r) in pairs {
            assert_eq!(
                BinaryCollation.compare(l, r),
                BinaryCollation.compare(r, l).reverse()
            );
        }
    }

    #[test]
    fn test_collation_name() {
        assert_eq!(BinaryCollation.name(), "binary");
    }
}
