//! Errors for the fallible typed accessors on [`Value`](crate::Value).
//!
//! Operators never produce these: a type or shape mismatch inside an
//! operator resolves to `Value::Undefined`. `ValueError` is only returned by
//! the `try_*` accessors the evaluator uses when a builtin requires a
//! particular argument type.

use crate::value::ValueType;

/// Result of a typed accessor.
pub type ValueResult<T> = Result<T, ValueError>;

/// Typed accessor failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The value has a different tag than the one requested.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
    /// A number was required to be finite.
    #[error("expected a finite number, found {0}")]
    NotFinite(f64),
}

impl ValueError {
    #[cold]
    pub(crate) fn mismatch(expected: ValueType, found: ValueType) -> Self {
        ValueError::TypeMismatch { expected, found }
    }
}
