//! 1-based, possibly negative position arithmetic shared by SUBSTRING, LEFT,
//! RIGHT, LOCATE and the padding functions.
//!
//! Every helper works in characters (Unicode scalar values), never bytes.
//! Callers collect the characters of the coerced text first and pass the
//! character count as `len`.

/// Translate a 1-based SQL position into a 0-based start offset.
///
/// `pos > 0` counts from the left, `pos < 0` counts from the right. Position
/// zero and positions outside `1..=len` (or `-len..=-1`) yield `None`.
pub fn resolve_start(len: usize, pos: i64) -> Option<usize> {
    match pos {
        0 => None,
        p if p > 0 => {
            let start = usize::try_from(p - 1).ok()?;
            (start < len).then_some(start)
        }
        p => {
            let back = usize::try_from(p.unsigned_abs()).ok()?;
            len.checked_sub(back)
        }
    }
}

/// Number of characters to take from `remaining`.
///
/// An absent length takes everything; a negative length takes nothing.
pub fn resolve_length(remaining: usize, requested: Option<i64>) -> usize {
    match requested {
        None => remaining,
        Some(n) if n <= 0 => 0,
        Some(n) => usize::try_from(n).map_or(remaining, |n| n.min(remaining)),
    }
}

/// A repeat or pad count, with zero and negative values mapped to zero.
pub fn clamp_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(if n < 0 { 0 } else { usize::MAX })
}

/// 0-based search start for LOCATE, or `None` when the search cannot match.
///
/// The start may equal `len` (an empty needle matches at the very end) but
/// may not exceed it.
pub fn locate_start(len: usize, pos: i64) -> Option<usize> {
    let start = usize::try_from(pos.checked_sub(1)?).ok()?;
    (start <= len).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_start_positive() {
        assert_eq!(resolve_start(6, 1), Some(0));
        assert_eq!(resolve_start(6, 6), Some(5));
        assert_eq!(resolve_start(6, 7), None);
        assert_eq!(resolve_start(6, 1000), None);
    }

    #[test]
    fn test_resolve_start_negative() {
        assert_eq!(resolve_start(6, -1), Some(5));
        assert_eq!(resolve_start(6, -5), Some(1));
        assert_eq!(resolve_start(6, -6), Some(0));
        assert_eq!(resolve_start(6, -7), None);
        assert_eq!(resolve_start(6, i64::MIN), None);
    }

    #[test]
    fn test_resolve_start_zero() {
        assert_eq!(resolve_start(6, 0), None);
        assert_eq!(resolve_start(0, 1), None);
    }

    #[test]
    fn test_resolve_length() {
        assert_eq!(resolve_length(5, None), 5);
        assert_eq!(resolve_length(5, Some(-1)), 0);
        assert_eq!(resolve_length(5, Some(0)), 0);
        assert_eq!(resolve_length(5, Some(3)), 3);
        assert_eq!(resolve_length(5, Some(1000)), 5);
        assert_eq!(resolve_length(5, Some(i64::MAX)), 5);
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(-3), 0);
        assert_eq!(clamp_count(0), 0);
        assert_eq!(clamp_count(4), 4);
    }

    #[test]
    fn test_locate_start() {
        assert_eq!(locate_start(6, 1), Some(0));
        assert_eq!(locate_start(6, 7), Some(6));
        assert_eq!(locate_start(6, 8), None);
        assert_eq!(locate_start(6, 0), None);
        assert_eq!(locate_start(6, -3), None);
        assert_eq!(locate_start(0, i64::MIN), None);
    }
}
