//! The element codec seam between structured literals and scalar leaf types.
//!
//! The array, composite, and range codecs never interpret leaf text
//! themselves; they hand every leaf to an [`ElementCodec`] supplied by the
//! caller's type registry. A codec converts between the text spelling of one
//! scalar type and its in-memory value, both directions infallible with
//! respect to shared state and synchronous with respect to errors.
//!
//! ## Supplied codecs
//!
//! - [`TextCodec`]: the identity codec for raw text leaves
//! - [`FromStrCodec`]: any `FromStr + Display` leaf type (`i64`, `f64`,
//!   [`num_bigint::BigInt`], ...)
//! - [`DateCodec`]: [`chrono::NaiveDate`] in ISO `YYYY-MM-DD` form
//! - [`TimestampCodec`]: [`chrono::DateTime<Utc>`] in RFC 3339 form
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{parse_array, FromStrCodec};
//!
//! let codec = FromStrCodec::<i64>::new();
//! let array = parse_array("{1,2,NULL}", &codec).unwrap();
//! assert_eq!(array.elements(), &[Some(1), Some(2), None]);
//! ```

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Parse/serialize functions for a single scalar leaf type.
///
/// The trait is object safe, so heterogeneous composites can decode through a
/// `&[&dyn ElementCodec<Value = V>]` slice sharing one leaf representation.
///
/// Implementations must be pure: no shared mutable state, no I/O, every call
/// independent.
pub trait ElementCodec {
    type Value;

    /// Decodes the text spelling of one leaf value.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid spelling of the type.
    fn parse(&self, text: &str) -> Result<Self::Value>;

    /// Produces the text spelling of one leaf value, without any quoting;
    /// the structural codec applies context-appropriate quoting on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no text spelling.
    fn serialize(&self, value: &Self::Value) -> Result<String>;

    /// Produces the leaf as a standalone SQL literal, for constructor-mode
    /// output where quoting is delegated to the element's own syntax.
    ///
    /// The default wraps [`serialize`](ElementCodec::serialize) in standard
    /// single-quote string-literal quoting.
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no text spelling.
    fn serialize_sql(&self, value: &Self::Value) -> Result<String> {
        let text = self.serialize(value)?;
        Ok(format!("'{}'", text.replace('\'', "''")))
    }
}

/// The identity codec: leaves are kept as raw text.
///
/// Useful when the caller's type registry does its own decoding, or when only
/// the structural shape of a literal matters.
///
/// # Examples
///
/// ```rust
/// use pglit::{ElementCodec, TextCodec};
///
/// assert_eq!(TextCodec.parse("hello").unwrap(), "hello");
/// assert_eq!(TextCodec.serialize(&"hello".to_string()).unwrap(), "hello");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCodec;

impl ElementCodec for TextCodec {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn serialize(&self, value: &String) -> Result<String> {
        Ok(value.clone())
    }
}

/// A codec for any leaf type that round-trips through `FromStr`/`Display`.
///
/// Covers the numeric leaf types (`i64`, `f64`, [`num_bigint::BigInt`]) and
/// anything else with a canonical text spelling.
///
/// # Examples
///
/// ```rust
/// use pglit::{ElementCodec, FromStrCodec};
/// use num_bigint::BigInt;
///
/// let codec = FromStrCodec::<BigInt>::new();
/// let big = codec.parse("340282366920938463463374607431768211456").unwrap();
/// assert_eq!(codec.serialize(&big).unwrap().len(), 39);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FromStrCodec<T>(PhantomData<T>);

impl<T> FromStrCodec<T> {
    #[must_use]
    pub const fn new() -> Self {
        FromStrCodec(PhantomData)
    }
}

impl<T> Default for FromStrCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ElementCodec for FromStrCodec<T>
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    type Value = T;

    fn parse(&self, text: &str) -> Result<T> {
        text.parse()
            .map_err(|e| Error::custom(format!("invalid leaf value {text:?}: {e}")))
    }

    fn serialize(&self, value: &T) -> Result<String> {
        Ok(value.to_string())
    }
}

/// A codec for [`chrono::NaiveDate`] leaves in ISO `YYYY-MM-DD` form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateCodec;

impl ElementCodec for DateCodec {
    type Value = NaiveDate;

    fn parse(&self, text: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| Error::custom(format!("invalid date {text:?}: {e}")))
    }

    fn serialize(&self, value: &NaiveDate) -> Result<String> {
        Ok(value.format("%Y-%m-%d").to_string())
    }
}

/// A codec for UTC timestamp leaves in RFC 3339 form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimestampCodec;

impl ElementCodec for TimestampCodec {
    type Value = DateTime<Utc>;

    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::custom(format!("invalid timestamp {text:?}: {e}")))
    }

    fn serialize(&self, value: &DateTime<Utc>) -> Result<String> {
        Ok(value.to_rfc3339())
    }
}
