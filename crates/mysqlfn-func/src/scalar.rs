//! Scalar (row-level) function trait.
//!
//! Scalar functions compute a single output value from an ordered argument
//! list. They are stateless across rows: each invocation is independent.
//!
//! # Send + Sync
//!
//! Catalog entries are built once and shared across threads via `Arc` by
//! concurrent query executors. Implementations must be thread-safe.
//!
//! # Context
//!
//! `invoke` receives the caller's [`EvalContext`] by shared reference. Entries
//! read limits from it but never mutate it.
#![allow(clippy::unnecessary_literal_bound)]

use mysqlfn_error::{ArgCount, Result};
use mysqlfn_types::{Datum, EvalContext};

/// A scalar SQL function.
///
/// Stored in the [`FunctionRegistry`](crate::FunctionRegistry) as
/// `Arc<dyn ScalarFunction>`.
///
/// # Error Handling
///
/// - Return `Ok(Datum::Null)` for NULL propagation and for domain failures
///   such as malformed hex digits or a result over `max_allowed_packet`.
/// - Return [`FuncError::TypeCoercion`](mysqlfn_error::FuncError::TypeCoercion)
///   when an argument cannot be converted to the required type.
///
/// `invoke` may assume the argument count satisfies [`arity`](Self::arity);
/// the registry checks it first.
pub trait ScalarFunction: Send + Sync {
    /// Execute this function on the given arguments.
    fn invoke(&self, args: &[Datum], cx: &EvalContext) -> Result<Datum>;

    /// Whether this function is deterministic (same inputs → same output).
    ///
    /// Defaults to `true`.
    fn is_deterministic(&self) -> bool {
        true
    }

    /// Accepted argument counts.
    fn arity(&self) -> ArgCount;

    /// The canonical function name, used for registration and in errors.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    // -- Mock: add_one(x) -> x + 1 --

    struct AddOne;

    impl ScalarFunction for AddOne {
        fn invoke(&self, args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
            if args[0].is_null() {
                return Ok(Datum::Null);
            }
            Ok(Datum::Int64(args[0].to_i64()? + 1))
        }

        fn arity(&self) -> ArgCount {
            ArgCount::exact(1)
        }

        fn name(&self) -> &str {
            "add_one"
        }
    }

    // -- Mock: now_ish() is non-deterministic --

    struct NowIsh;

    impl ScalarFunction for NowIsh {
        fn invoke(&self, _args: &[Datum], _cx: &EvalContext) -> Result<Datum> {
            Ok(Datum::Int64(0))
        }

        fn is_deterministic(&self) -> bool {
            false
        }

        fn arity(&self) -> ArgCount {
            ArgCount::exact(0)
        }

        fn name(&self) -> &str {
            "now_ish"
        }
    }

    #[test]
    fn test_scalar_invoke_through_arc() {
        let f: Arc<dyn ScalarFunction> = Arc::new(AddOne);
        let cx = EvalContext::new();
        assert_eq!(f.invoke(&[Datum::Int64(41)], &cx).unwrap(), Datum::Int64(42));
        assert_eq!(f.invoke(&[Datum::from("1")], &cx).unwrap(), Datum::Int64(2));
        assert_eq!(f.invoke(&[Datum::Null], &cx).unwrap(), Datum::Null);
    }

    #[test]
    fn test_scalar_coercion_error_surfaces() {
        let err = AddOne
            .invoke(&[Datum::from("abc")], &EvalContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            mysqlfn_error::FuncError::TypeCoercion { to: "integer", .. }
        ));
    }

    #[test]
    fn test_scalar_deterministic_default() {
        assert!(AddOne.is_deterministic());
        assert!(!NowIsh.is_deterministic());
    }

    #[test]
    fn test_scalar_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Arc<dyn ScalarFunction>>();
    }
}
