//! Evaluation context (`EvalContext`) threaded into every builtin call.
//!
//! The context is owned by the outer query engine and supplied per statement
//! or session. Builtins only read it: the core never mutates a context and
//! makes no assumption about which thread created it.
//!
//! Besides the [`FunctionLimits`] the builtins consult, a context can carry an
//! opaque session payload that the core passes through untouched. Engines use
//! it to hand session state to their own registered functions.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::limits::FunctionLimits;

/// Per-statement evaluation context.
///
/// Cheap to clone: the session payload is reference-counted.
#[derive(Clone, Default)]
pub struct EvalContext {
    limits: FunctionLimits,
    session: Option<Arc<dyn Any + Send + Sync>>,
}

impl EvalContext {
    /// A context with default limits and no session payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: FunctionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Attach an engine-defined session payload.
    #[must_use]
    pub fn with_session<T: Any + Send + Sync>(mut self, session: Arc<T>) -> Self {
        self.session = Some(session);
        self
    }

    /// Resource limits in effect for this statement.
    pub fn limits(&self) -> &FunctionLimits {
        &self.limits
    }

    /// The session payload, if one of type `T` was attached.
    pub fn session<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.session.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("limits", &self.limits)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Session {
        user: &'static str,
    }

    #[test]
    fn default_limits() {
        let cx = EvalContext::new();
        assert_eq!(*cx.limits(), FunctionLimits::default());
    }

    #[test]
    fn session_roundtrip() {
        let cx = EvalContext::new().with_session(Arc::new(Session { user: "root" }));
        assert_eq!(cx.session::<Session>(), Some(&Session { user: "root" }));
        assert!(cx.session::<String>().is_none());
    }

    #[test]
    fn context_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EvalContext>();
    }

    #[test]
    fn debug_hides_session() {
        let cx = EvalContext::new()
            .with_limits(FunctionLimits {
                max_allowed_packet: 8,
            })
            .with_session(Arc::new(42_u32));
        let rendered = format!("{cx:?}");
        assert!(rendered.contains("max_allowed_packet: 8"));
        assert!(rendered.contains("has_session: true"));
    }
}
