//! Error types for literal parsing, serialization, and the range algebra.
//!
//! This module provides a single crate-wide [`Error`] enum with contextual
//! information attached to each failure.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: malformed tokens, unbalanced structural characters,
//!   or unexpected end of input, carrying the byte offset of the offending
//!   character
//! - **Dimension Mismatches**: sibling array groups of unequal length, or a
//!   nested builder whose index set is not a contiguous run
//! - **Invalid Bounds**: inconsistent `[lo:hi]` bounds decoration
//! - **Unsupported Operations**: discrete-only range operations invoked on a
//!   continuous subtype
//!
//! All errors are reported synchronously to the caller; nothing is retried or
//! recovered internally, and no failure corrupts shared state.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{parse_array, Error, TextCodec};
//!
//! let result = parse_array("{{1,2,3},{4,5}}", &TextCodec);
//! assert!(matches!(
//!     result,
//!     Err(Error::DimensionMismatch { expected: 3, actual: 2 })
//! ));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors reported by the array, composite, and range
/// codecs.
///
/// Each variant carries the context needed to diagnose the failure without
/// re-parsing the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed token, unbalanced structural character, or unexpected end of
    /// input. The offset is a byte position into the literal text.
    #[error("syntax error at offset {offset}: {msg}")]
    Syntax { offset: usize, msg: String },

    /// Sibling array groups of unequal length, or an arity mismatch between a
    /// value and its declared attribute list.
    #[error("dimension mismatch: expected {expected} elements, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Index-keyed builder input whose indices do not form a contiguous
    /// integer run at some nesting level.
    #[error("non-contiguous index at nesting level {level}: expected {expected}, found {found}")]
    NonContiguousIndex {
        level: usize,
        expected: i64,
        found: i64,
    },

    /// Bounds decoration whose upper bound lies below its lower bound.
    #[error("invalid bounds decoration [{lower}:{upper}]: upper bound cannot be less than lower bound")]
    InvalidBounds { lower: i64, upper: i64 },

    /// A discrete-only operation was invoked on a continuous range subtype,
    /// or an operation was otherwise undefined for its inputs.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Constructor-mode array output cannot express custom lower bounds.
    ///
    /// Raised by default instead of silently dropping the bounds; see
    /// [`BoundsPolicy`](crate::options::BoundsPolicy) to opt into the drop.
    #[error("constructor syntax cannot express custom array lower bounds")]
    BoundsLoss,

    /// Custom error with a display message.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::Error;
    ///
    /// let err = Error::syntax(12, "unexpected end of input");
    /// assert!(err.to_string().contains("offset 12"));
    /// ```
    pub fn syntax(offset: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            msg: msg.into(),
        }
    }

    /// Creates a dimension mismatch error with the expected and actual
    /// sibling counts.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch { expected, actual }
    }

    /// Creates a non-contiguous index error for index-keyed builder input.
    pub fn non_contiguous_index(level: usize, expected: i64, found: i64) -> Self {
        Error::NonContiguousIndex {
            level,
            expected,
            found,
        }
    }

    /// Creates an invalid bounds decoration error.
    pub fn invalid_bounds(lower: i64, upper: i64) -> Self {
        Error::InvalidBounds { lower, upper }
    }

    /// Creates an unsupported operation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::Error;
    ///
    /// let err = Error::unsupported("is_single_point requires a discrete subtype");
    /// assert!(err.to_string().contains("discrete"));
    /// ```
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedOperation(msg.into())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
