//! Error types for qada.
//!
//! Every crate in the workspace reports failures through the single
//! `thiserror`-derived [`Error`] enum defined here.  Input problems are
//! *validation* errors and are raised before any calculation runs; invariant
//! violations on counters are *conflict* errors.  Neither class is retried
//! automatically.
//!
//! The [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros provide
//! terse early returns for validation failures.

use thiserror::Error;

/// The top-level error type used throughout qada.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric input lies outside its configured bounds.
    ///
    /// Rendered as e.g. "duration must be between 3 and 10, got 12" so the
    /// presentation layer can show it verbatim.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// Malformed or inconsistent input.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A calendar date could not be built or parsed.
    #[error("date error: {0}")]
    Date(String),

    /// A counter mutation would make `total_owed` smaller than `fulfilled`.
    #[error(
        "conflict on {category}: owed {total_owed} adjusted by {delta} would fall below fulfilled {fulfilled}"
    )]
    Conflict {
        /// Display form of the category that was targeted.
        category: String,
        /// Owed count before the rejected mutation.
        total_owed: u32,
        /// Fulfilled count before the rejected mutation.
        fulfilled: u32,
        /// The rejected adjustment.
        delta: i64,
    },
}

impl Error {
    /// Build an [`Error::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Build an [`Error::OutOfRange`] from any integer-like values.
    pub fn out_of_range(
        field: &'static str,
        value: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Self {
        Error::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// `true` for input errors the caller must fix and resubmit.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. } | Error::Validation { .. } | Error::Date(_)
        )
    }

    /// `true` for rejected counter mutations.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Name of the field an input error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::OutOfRange { field, .. } | Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Shorthand `Result` type used throughout qada.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Validation { .. })` unless `$cond` holds.
///
/// # Example
/// ```
/// use qd_core::{ensure, errors::Result};
/// fn positive(x: i32) -> Result<i32> {
///     ensure!(x > 0, "x", "must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert_eq!(positive(-1).unwrap_err().field(), Some("x"));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $field:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Validation {
                field: $field,
                reason: format!($($msg)*),
            });
        }
    };
}

/// Return `Err(Error::Validation { .. })` immediately.
///
/// # Example
/// ```
/// use qd_core::{fail, errors::Result};
/// fn always_err() -> Result<()> {
///     fail!("input", "something went wrong");
/// }
/// assert!(always_err().unwrap_err().is_validation());
/// ```
#[macro_export]
macro_rules! fail {
    ($field:expr, $($msg:tt)*) => {
        return Err($crate::errors::Error::Validation {
            field: $field,
            reason: format!($($msg)*),
        })
    };
}
