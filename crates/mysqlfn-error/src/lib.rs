use std::fmt;

use thiserror::Error;

/// Primary error type for scalar function evaluation.
///
/// SQL NULL propagation is never an error: functions that degrade to NULL
/// (malformed hex digits, size-guard overflow, NULL inputs) return
/// `Ok(Datum::Null)`. Only the cases below surface as `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FuncError {
    // === Catalog Errors ===
    /// No function with this name is registered.
    #[error("FUNCTION {name} does not exist")]
    NoSuchFunction { name: String },

    /// Wrong number of arguments for a named function.
    #[error("incorrect parameter count in the call to native function '{name}': expected {expected}, got {actual}")]
    Arity {
        name: String,
        expected: ArgCount,
        actual: usize,
    },

    // === Argument Errors ===
    /// An argument cannot be converted to the type the function requires.
    #[error("cannot convert {from} value to {to}")]
    TypeCoercion { from: String, to: &'static str },

    /// A NULL argument where the function reports an error instead of
    /// propagating NULL. The result placeholder is NULL.
    #[error("{function}: argument {position} is NULL")]
    NullArgument {
        function: &'static str,
        position: usize,
    },

    // === Option Errors ===
    /// Unknown character set name (e.g. in `CONVERT(expr USING name)`).
    #[error("unknown character set: '{name}'")]
    UnknownCharset { name: String },

    // === Internal Errors ===
    /// Internal logic error (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Accepted argument count range of a catalog entry, as shown in
/// [`FuncError::Arity`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgCount {
    /// Minimum number of arguments.
    pub min: usize,
    /// Maximum number of arguments, `None` for variadic.
    pub max: Option<usize>,
}

impl ArgCount {
    /// Exactly `n` arguments.
    pub const fn exact(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Between `min` and `max` arguments, inclusive.
    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// At least `min` arguments.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Whether `n` arguments are accepted.
    pub const fn accepts(&self, n: usize) -> bool {
        n >= self.min
            && match self.max {
                Some(max) => n <= max,
                None => true,
            }
    }

    /// Validate a call site, producing [`FuncError::Arity`] on mismatch.
    pub fn check(&self, name: &str, actual: usize) -> Result<()> {
        if self.accepts(actual) {
            Ok(())
        } else {
            Err(FuncError::Arity {
                name: name.to_owned(),
                expected: *self,
                actual,
            })
        }
    }
}

impl fmt::Display for ArgCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..={max}", self.min),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Error taxonomy shared by every builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Function name could not be resolved.
    Lookup,
    /// Wrong argument count, reported before argument evaluation.
    Arity,
    /// Argument not convertible to the required type.
    TypeCoercion,
    /// NULL input signalled as an error rather than propagated.
    NullArgument,
    /// Unsupported option value such as an unknown character set.
    UnsupportedOption,
    /// Bug in the core.
    Internal,
}

/// MySQL server error numbers for wire protocol compatibility.
///
/// These match the numeric values from MySQL's `mysqld_error.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// `ER_UNKNOWN_CHARACTER_SET`.
    UnknownCharacterSet = 1115,
    /// `ER_WRONG_ARGUMENTS`.
    WrongArguments = 1210,
    /// `ER_TRUNCATED_WRONG_VALUE`.
    TruncatedWrongValue = 1292,
    /// `ER_SP_DOES_NOT_EXIST`.
    FunctionDoesNotExist = 1305,
    /// `ER_WRONG_PARAMCOUNT_TO_NATIVE_FCT`.
    WrongParamCountToNativeFct = 1582,
    /// `ER_INTERNAL_ERROR`.
    InternalError = 1815,
}

impl FuncError {
    /// Classify this error within the shared taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchFunction { .. } => ErrorKind::Lookup,
            Self::Arity { .. } => ErrorKind::Arity,
            Self::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            Self::NullArgument { .. } => ErrorKind::NullArgument,
            Self::UnknownCharset { .. } => ErrorKind::UnsupportedOption,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Map this error to a MySQL error number.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NoSuchFunction { .. } => ErrorCode::FunctionDoesNotExist,
            Self::Arity { .. } => ErrorCode::WrongParamCountToNativeFct,
            Self::TypeCoercion { .. } => ErrorCode::TruncatedWrongValue,
            Self::NullArgument { .. } => ErrorCode::WrongArguments,
            Self::UnknownCharset { .. } => ErrorCode::UnknownCharacterSet,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the user can likely fix this by changing the statement.
    pub const fn is_user_recoverable(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// Evaluation is deterministic, so retrying a failed call cannot succeed.
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoSuchFunction { .. } => Some("Check the function name for typos"),
            Self::Arity { .. } => Some("Check the number of arguments passed to the function"),
            Self::TypeCoercion { .. } => {
                Some("Pass an integer literal or CAST the argument to a numeric type")
            }
            Self::UnknownCharset { .. } => {
                Some("Use a supported character set such as utf8mb4, latin1, ascii or binary")
            }
            Self::NullArgument { .. } | Self::Internal(_) => None,
        }
    }

    /// Create a type coercion error.
    pub fn coercion(from: impl Into<String>, to: &'static str) -> Self {
        Self::TypeCoercion {
            from: from.into(),
            to,
        }
    }

    /// Create an unknown character set error.
    pub fn unknown_charset(name: impl Into<String>) -> Self {
        Self::UnknownCharset { name: name.into() }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `FuncError`.
pub type Result<T> = std::result::Result<T, FuncError>;
