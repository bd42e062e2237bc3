//! MySQL-compatible string scalar functions.
//!
//! This crate defines the [`ScalarFunction`] trait implemented by every
//! catalog entry, the [`CollationFunction`] seam used for string comparison,
//! the positional helpers in [`index`], and the builtin string functions in
//! [`builtins`].
//!
//! It also provides the in-memory [`FunctionRegistry`] that resolves a
//! function name (case-insensitively, through aliases) to its entry and
//! checks the argument count before invoking it.
#![allow(clippy::unnecessary_literal_bound)]

use std::collections::HashMap;
use std::sync::Arc;

use mysqlfn_error::{FuncError, Result};
use mysqlfn_types::{Datum, EvalContext};
use tracing::{debug, trace};

pub mod builtins;
pub mod collation;
pub mod index;
pub mod scalar;

pub use builtins::{TrimDirection, register_builtins};
pub use collation::{BinaryCollation, CollationFunction};
pub use mysqlfn_error::ArgCount as Arity;
pub use scalar::ScalarFunction;

/// Registry of scalar functions keyed by canonical (trimmed, upper-case)
/// name, plus alias names that resolve to a registered entry.
///
/// Built once and then shared read-only, typically as
/// `Arc<FunctionRegistry>`. Lookup strategy:
/// 1. Exact match on the canonical name.
/// 2. Alias match, resolved to the target entry.
/// 3. `None` (callers raise [`FuncError::NoSuchFunction`]).
#[derive(Default)]
pub struct FunctionRegistry {
    scalars: HashMap<String, Arc<dyn ScalarFunction>>,
    aliases: HashMap<String, String>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every builtin string function.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register a scalar function under its [`name`](ScalarFunction::name).
    ///
    /// Overwrites any existing function with the same name. Returns the
    /// previous function if one existed.
    pub fn register_scalar<F>(&mut self, function: F) -> Option<Arc<dyn ScalarFunction>>
    where
        F: ScalarFunction + 'static,
    {
        let canon = canonical_name(function.name());
        debug!(name = %canon, arity = %function.arity(), "register scalar");
        self.scalars.insert(canon, Arc::new(function))
    }

    /// Make `alias` resolve to the function registered as `target`.
    ///
    /// Returns `false` (and registers nothing) if `target` is unknown.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> bool {
        let target = canonical_name(target);
        if !self.scalars.contains_key(&target) {
            debug!(alias, target = %target, "alias target missing");
            return false;
        }
        let alias = canonical_name(alias);
        debug!(alias = %alias, target = %target, "register alias");
        self.aliases.insert(alias, target);
        true
    }

    /// Look up a scalar function by name or alias, case-insensitively.
    #[must_use]
    pub fn find_scalar(&self, name: &str) -> Option<Arc<dyn ScalarFunction>> {
        let canon = canonical_name(name);
        if let Some(f) = self.scalars.get(&canon) {
            debug!(name = %canon, kind = "scalar", hit = "exact", "registry lookup");
            return Some(Arc::clone(f));
        }
        let result = self
            .aliases
            .get(&canon)
            .and_then(|target| self.scalars.get(target))
            .map(Arc::clone);
        debug!(
            name = %canon,
            kind = "scalar",
            hit = if result.is_some() { "alias" } else { "miss" },
            "registry lookup"
        );
        result
    }

    /// Whether a function or alias with this name is registered.
    #[must_use]
    pub fn contains_scalar(&self, name: &str) -> bool {
        let canon = canonical_name(name);
        self.scalars.contains_key(&canon) || self.aliases.contains_key(&canon)
    }

    /// Canonical names of every registered function (aliases excluded),
    /// sorted.
    #[must_use]
    pub fn scalar_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scalars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve `name`, check the argument count, then evaluate.
    ///
    /// # Errors
    ///
    /// [`FuncError::NoSuchFunction`] for an unknown name,
    /// [`FuncError::Arity`] when `args.len()` is outside the entry's
    /// [`arity`](ScalarFunction::arity), and whatever the function returns.
    pub fn invoke(&self, name: &str, args: &[Datum], cx: &EvalContext) -> Result<Datum> {
        let f = self.find_scalar(name).ok_or_else(|| FuncError::NoSuchFunction {
            name: canonical_name(name),
        })?;
        f.arity().check(&canonical_name(name), args.len())?;
        trace!(name = f.name(), argc = args.len(), "invoke scalar");
        f.invoke(args, cx)
    }
}

fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
