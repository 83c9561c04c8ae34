//! # pglit
//!
//! Parsing, construction, and serialization for PostgreSQL's structured
//! value literals: multi-dimensional arrays, composite (row) values, and
//! ranges.
//!
//! ## What does it cover?
//!
//! The engine's external text formats are deceptively subtle: array
//! literals carry optional bounds decoration (`[0:1]={...}`), composite
//! literals treat an empty field and a quoted empty string differently,
//! and range literals mix inclusivity markers with quoting rules. This
//! crate implements those grammars faithfully, along with the range order
//! algebra (containment, overlap, intersection, strict position tests)
//! built on normalized bounds.
//!
//! ## Key Features
//!
//! - **Array literals**: N-dimensional `{...}` values with custom lower
//!   bounds, stored flat in row-major order
//! - **Composite literals**: `(...)` rows with positional and named field
//!   access, including the engine's empty-vs-`NULL` distinction
//! - **Ranges**: parse/serialize plus a full order algebra over pluggable
//!   subtypes, with discrete-type canonicalization
//! - **Pluggable element codecs**: bring your own scalar type via
//!   [`ElementCodec`], or use the built-ins
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pglit = "0.1"
//! ```
//!
//! ### Arrays
//!
//! ```rust
//! use pglit::{parse_array, serialize_array, FromStrCodec};
//!
//! let codec = FromStrCodec::<i64>::new();
//! let array = parse_array("{{1,2,3},{4,5,6}}", &codec).unwrap();
//! assert_eq!(array.ndim(), 2);
//! assert_eq!(array.get(&[2, 3]), Some(&Some(6)));
//!
//! let text = serialize_array(&array, &codec).unwrap();
//! assert_eq!(text, "{{1,2,3},{4,5,6}}");
//! ```
//!
//! ### Composites
//!
//! ```rust
//! use pglit::{parse_composite, serialize_composite};
//!
//! let row = parse_composite("(42,\"hello, world\",)").unwrap();
//! assert_eq!(row.field(0), Some(Some("42")));
//! assert_eq!(row.field(2), Some(None)); // empty field is NULL
//!
//! assert_eq!(serialize_composite(&row).unwrap(), "(42,\"hello, world\",)");
//! ```
//!
//! ### Ranges
//!
//! ```rust
//! use pglit::{FromStrCodec, IntSubtype, RangeType};
//!
//! let ty = RangeType::new(IntSubtype);
//! let codec = FromStrCodec::<i64>::new();
//!
//! // Discrete ranges canonicalize to [inclusive, exclusive).
//! let r = ty.parse("(1,9]", &codec).unwrap();
//! assert_eq!(ty.to_text(&r, &codec).unwrap(), "[2,10)");
//!
//! let other = ty.parse("[5,20)", &codec).unwrap();
//! assert!(ty.overlaps(&r, &other));
//! assert_eq!(ty.to_text(&ty.intersect(&r, &other), &codec).unwrap(), "[5,10)");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - Parsing depth is capped to guard against adversarial nesting

pub mod array;
pub mod codec;
pub mod composite;
pub mod error;
pub mod options;
pub mod range;
pub mod scan;
pub mod subtype;

pub use array::{Array, Dim, Nested};
pub use codec::{DateCodec, ElementCodec, FromStrCodec, TextCodec, TimestampCodec};
pub use composite::Composite;
pub use error::{Error, Result};
pub use options::{
    ArrayOptions, BoundsPolicy, CompositeOptions, OutputMode, DEFAULT_MAX_DEPTH,
};
pub use range::{Range, RangeBound, RangeSubtype, RangeType};
pub use subtype::{
    BigIntSubtype, DateSubtype, FloatSubtype, IntSubtype, TextSubtype, TimestampSubtype,
};

/// Parse an array literal with default options.
///
/// # Examples
///
/// ```rust
/// use pglit::{parse_array, TextCodec};
///
/// let array = parse_array("{a,b,NULL}", &TextCodec).unwrap();
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.elements()[2], None);
/// ```
///
/// # Errors
///
/// Returns an error on malformed syntax, ragged dimensions, or invalid
/// bounds decoration.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_array<C>(text: &str, codec: &C) -> Result<Array<C::Value>>
where
    C: ElementCodec,
{
    array::parse_with(text, codec, &ArrayOptions::default())
}

/// Parse an array literal with custom options.
///
/// # Examples
///
/// ```rust
/// use pglit::{parse_array_with, ArrayOptions, TextCodec};
///
/// let options = ArrayOptions::new().with_max_depth(2);
/// let err = parse_array_with("{{{1}}}", &TextCodec, &options).unwrap_err();
/// assert!(err.to_string().contains("exceeds the maximum"));
/// ```
///
/// # Errors
///
/// Returns an error on malformed syntax, ragged dimensions, invalid bounds
/// decoration, or nesting beyond `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_array_with<C>(
    text: &str,
    codec: &C,
    options: &ArrayOptions,
) -> Result<Array<C::Value>>
where
    C: ElementCodec,
{
    array::parse_with(text, codec, options)
}

/// Serialize an array to literal syntax with default options.
///
/// # Errors
///
/// Returns an error if the element codec fails on a value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_array<C>(array: &Array<C::Value>, codec: &C) -> Result<String>
where
    C: ElementCodec,
{
    array.to_text(codec)
}

/// Serialize an array with custom options.
///
/// # Examples
///
/// ```rust
/// use pglit::{parse_array, serialize_array_with, ArrayOptions, OutputMode, TextCodec};
///
/// let array = parse_array("{a,b}", &TextCodec).unwrap();
/// let options = ArrayOptions::new().with_mode(OutputMode::Constructor);
/// assert_eq!(
///     serialize_array_with(&array, &TextCodec, &options).unwrap(),
///     "ARRAY['a','b']"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the codec fails, or, in constructor mode under the
/// default bounds policy, if the array has custom lower bounds.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_array_with<C>(
    array: &Array<C::Value>,
    codec: &C,
    options: &ArrayOptions,
) -> Result<String>
where
    C: ElementCodec,
{
    array.to_text_with(codec, options)
}

/// Parse a composite literal into raw field texts.
///
/// # Examples
///
/// ```rust
/// use pglit::parse_composite;
///
/// let row = parse_composite("(1,\"two, three\",)").unwrap();
/// assert_eq!(row.len(), 3);
/// assert_eq!(row.field(1), Some(Some("two, three")));
/// ```
///
/// # Errors
///
/// Returns an error on malformed syntax.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_composite(text: &str) -> Result<Composite> {
    composite::parse(text)
}

/// Parse a composite literal and decode every field with per-position codecs.
///
/// # Examples
///
/// ```rust
/// use pglit::{parse_composite_decoded, ElementCodec, FromStrCodec};
///
/// let codec = FromStrCodec::<i64>::new();
/// let codecs: Vec<&dyn ElementCodec<Value = i64>> = vec![&codec, &codec];
/// let values = parse_composite_decoded("(1,)", &codecs).unwrap();
/// assert_eq!(values, vec![Some(1), None]);
/// ```
///
/// # Errors
///
/// Returns an error on malformed syntax, an arity mismatch with the codec
/// slice, or a codec failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_composite_decoded<V>(
    text: &str,
    codecs: &[&dyn ElementCodec<Value = V>],
) -> Result<Vec<Option<V>>> {
    composite::parse_decoded(text, codecs)
}

/// Serialize a composite to literal syntax with default options.
///
/// # Errors
///
/// Returns an error if the row cannot be rendered in the configured mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_composite(row: &Composite) -> Result<String> {
    row.to_text()
}

/// Serialize a composite with custom options.
///
/// # Errors
///
/// Returns an error if the row cannot be rendered in the configured mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_composite_with(row: &Composite, options: &CompositeOptions) -> Result<String> {
    row.to_text_with(options)
}

/// Parse a range literal against a range type.
///
/// Equivalent to [`RangeType::parse`]; present for symmetry with the other
/// top-level entry points.
///
/// # Errors
///
/// Returns an error on malformed syntax or a codec failure on a bound.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_range<S, C>(ty: &RangeType<S>, text: &str, codec: &C) -> Result<Range<S::Value>>
where
    S: RangeSubtype,
    C: ElementCodec<Value = S::Value>,
{
    ty.parse(text, codec)
}

/// Serialize a range against a range type.
///
/// Equivalent to [`RangeType::to_text`].
///
/// # Errors
///
/// Returns an error if the element codec fails on a bound value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_range<S, C>(
    ty: &RangeType<S>,
    range: &Range<S::Value>,
    codec: &C,
) -> Result<String>
where
    S: RangeSubtype,
    C: ElementCodec<Value = S::Value>,
{
    ty.to_text(range, codec)
}
