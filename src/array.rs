//! Multi-dimensional array values and their literal codec.
//!
//! This module provides the [`Array`] value type and the parse/serialize
//! implementation for the engine's array literal syntax:
//!
//! ```text
//! array_lit    := bounds_decor? '{' array_body '}'
//! bounds_decor := ('[' INT ':' INT ']')+ '='
//! array_body   := /* empty */ | element (',' element)*
//! element      := array_lit | token | 'NULL'
//! ```
//!
//! ## Storage model
//!
//! An array is a `(shape, flat elements)` pair: an ordered sequence of
//! dimension descriptors plus the leaf values in row-major order. The nested
//! text form is flattened on parse and reconstructed on serialize from
//! computed row-major strides, so shape validation is a single comparison of
//! the flat length against the product of the declared dimension lengths.
//!
//! Lower bounds may be any integer; the engine's implicit default is 1
//! (explicitly not 0-based). An empty shape denotes the empty array `{}`.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{parse_array, FromStrCodec};
//!
//! let codec = FromStrCodec::<i64>::new();
//! let array = parse_array("[0:1][-3:-1]={{1,2,3},{4,5,6}}", &codec).unwrap();
//! assert_eq!(array.dims().len(), 2);
//! assert_eq!(array.get(&[0, -3]), Some(&Some(1)));
//! assert_eq!(array.get(&[1, -1]), Some(&Some(6)));
//! ```

use crate::codec::ElementCodec;
use crate::options::{ArrayOptions, BoundsPolicy, OutputMode};
use crate::scan::{self, RawToken, Scanner, ARRAY_RULES};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Characters that force quoting of array leaf text.
const ARRAY_SPECIALS: &[char] = &['{', '}', ','];

/// One dimension of an array: its lower bound and its length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dim {
    pub lower: i64,
    pub len: usize,
}

impl Dim {
    /// A dimension with the engine's default lower bound of 1.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Dim { lower: 1, len }
    }

    /// A dimension with a custom lower bound.
    #[must_use]
    pub const fn with_lower(lower: i64, len: usize) -> Self {
        Dim { lower, len }
    }

    /// The inclusive upper bound of this dimension's index range.
    #[must_use]
    pub const fn upper(&self) -> i64 {
        self.lower + self.len as i64 - 1
    }
}

/// A multi-dimensional array value: shape plus flat row-major elements.
///
/// Immutable once constructed; every transformation returns a new value.
///
/// # Examples
///
/// ```rust
/// use pglit::{Array, Dim};
///
/// let array = Array::new(
///     vec![Dim::new(2), Dim::new(2)],
///     vec![Some(1), Some(2), None, Some(4)],
/// )
/// .unwrap();
/// assert_eq!(array.get(&[1, 1]), Some(&Some(1)));
/// assert_eq!(array.get(&[2, 1]), Some(&None));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Array<T> {
    dims: Vec<Dim>,
    elements: Vec<Option<T>>,
}

impl<T> Array<T> {
    /// Constructs an array from a shape and flat row-major elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless the element count equals
    /// the product of the dimension lengths (zero-dimensional arrays must be
    /// element-free).
    pub fn new(dims: Vec<Dim>, elements: Vec<Option<T>>) -> Result<Self> {
        let mut expected: usize = if dims.is_empty() { 0 } else { 1 };
        for dim in &dims {
            expected = expected
                .checked_mul(dim.len)
                .ok_or_else(|| Error::custom("array shape overflows addressable size"))?;
        }
        if elements.len() != expected {
            return Err(Error::dimension_mismatch(expected, elements.len()));
        }
        Ok(Array { dims, elements })
    }

    /// The empty, zero-dimensional array `{}`.
    #[must_use]
    pub fn empty() -> Self {
        Array {
            dims: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// The array's shape, one descriptor per dimension.
    #[must_use]
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// The flat elements in row-major order.
    #[must_use]
    pub fn elements(&self) -> &[Option<T>] {
        &self.elements
    }

    /// Number of dimensions. Zero for the empty array.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consumes the array, returning its shape and flat elements.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Dim>, Vec<Option<T>>) {
        (self.dims, self.elements)
    }

    /// Looks up an element by bound-aware indices, one per dimension.
    ///
    /// Returns `None` when the arity or any index is out of range. The inner
    /// `Option` is the element's own nullness.
    #[must_use]
    pub fn get(&self, indices: &[i64]) -> Option<&Option<T>> {
        if indices.len() != self.dims.len() || self.dims.is_empty() {
            return None;
        }
        let mut offset = 0usize;
        for (dim, &index) in self.dims.iter().zip(indices) {
            if index < dim.lower || index > dim.upper() {
                return None;
            }
            offset = offset * dim.len + (index - dim.lower) as usize;
        }
        self.elements.get(offset)
    }

    /// Builds an array from nested builder input, inferring the shape.
    ///
    /// The shape is taken from the first leaf path; every sibling collection
    /// at one nesting level must then have identical length, and index-keyed
    /// children must form a contiguous ascending run (any starting point,
    /// including negative).
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] for ragged lengths or depth,
    /// [`Error::NonContiguousIndex`] for a broken index run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::{Array, Nested};
    ///
    /// let array = Array::from_nested(Nested::List(vec![
    ///     Nested::List(vec![Nested::Leaf(Some(1)), Nested::Leaf(Some(2))]),
    ///     Nested::List(vec![Nested::Leaf(None), Nested::Leaf(Some(4))]),
    /// ]))
    /// .unwrap();
    /// assert_eq!(array.dims().len(), 2);
    /// assert_eq!(array.elements().len(), 4);
    /// ```
    pub fn from_nested(nested: Nested<T>) -> Result<Self> {
        if matches!(nested, Nested::Leaf(_)) {
            return Err(Error::custom("nested array input must start with a list"));
        }
        let mut dims = Vec::new();
        shape_of(&nested, &mut dims)?;
        if dims.iter().any(|d| d.len == 0) {
            return Ok(Array::empty());
        }
        let mut elements = Vec::with_capacity(dims.iter().map(|d| d.len).product());
        flatten(nested, 0, &dims, &mut elements)?;
        Array::new(dims, elements)
    }

    /// Serializes the array in literal mode with default options.
    ///
    /// Equivalent to [`to_text_with`](Array::to_text_with) using
    /// [`ArrayOptions::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the element codec rejects a leaf.
    pub fn to_text<C>(&self, codec: &C) -> Result<String>
    where
        C: ElementCodec<Value = T>,
    {
        self.to_text_with(codec, &ArrayOptions::default())
    }

    /// Serializes the array under the given options.
    ///
    /// Literal mode emits `{...}` with bounds decoration whenever any lower
    /// bound differs from 1, optionally wrapped as `'...'::<cast>`.
    /// Constructor mode emits `ARRAY[...]`, which cannot express custom
    /// lower bounds; by default that loss is an error, see
    /// [`BoundsPolicy`].
    ///
    /// # Errors
    ///
    /// [`Error::BoundsLoss`] in constructor mode with custom bounds under
    /// the default policy, or any error from the element codec.
    pub fn to_text_with<C>(&self, codec: &C, options: &ArrayOptions) -> Result<String>
    where
        C: ElementCodec<Value = T>,
    {
        match options.mode {
            OutputMode::Literal => {
                let literal = self.literal_text(codec)?;
                Ok(match &options.cast {
                    Some(cast) => format!("'{}'::{}", literal.replace('\'', "''"), cast),
                    None => literal,
                })
            }
            OutputMode::Constructor => self.constructor_text(codec, options),
        }
    }

    fn literal_text<C>(&self, codec: &C) -> Result<String>
    where
        C: ElementCodec<Value = T>,
    {
        let mut out = String::new();
        if self.dims.iter().any(|d| d.lower != 1) {
            for dim in &self.dims {
                let _ = write!(out, "[{}:{}]", dim.lower, dim.upper());
            }
            out.push('=');
        }
        if self.dims.is_empty() {
            out.push_str("{}");
            return Ok(out);
        }
        let strides = self.strides();
        self.write_group(&mut out, 0, 0, &strides, codec)?;
        Ok(out)
    }

    fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.dims.len()];
        for depth in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[depth] = strides[depth + 1] * self.dims[depth + 1].len;
        }
        strides
    }

    fn write_group<C>(
        &self,
        out: &mut String,
        depth: usize,
        base: usize,
        strides: &[usize],
        codec: &C,
    ) -> Result<()>
    where
        C: ElementCodec<Value = T>,
    {
        out.push('{');
        for i in 0..self.dims[depth].len {
            if i > 0 {
                out.push(',');
            }
            let offset = base + i * strides[depth];
            if depth + 1 < self.dims.len() {
                self.write_group(out, depth + 1, offset, strides, codec)?;
            } else {
                match &self.elements[offset] {
                    None => out.push_str("NULL"),
                    Some(value) => {
                        let text = codec.serialize(value)?;
                        if scan::needs_quoting(&text, ARRAY_SPECIALS, &["NULL"]) {
                            scan::quote_into(out, &text);
                        } else {
                            out.push_str(&text);
                        }
                    }
                }
            }
        }
        out.push('}');
        Ok(())
    }

    fn constructor_text<C>(&self, codec: &C, options: &ArrayOptions) -> Result<String>
    where
        C: ElementCodec<Value = T>,
    {
        if self.dims.iter().any(|d| d.lower != 1)
            && options.bounds_policy == BoundsPolicy::Error
        {
            return Err(Error::BoundsLoss);
        }
        let mut out = String::from("ARRAY");
        if self.dims.is_empty() {
            out.push_str("[]");
            return Ok(out);
        }
        let strides = self.strides();
        self.write_constructor_group(&mut out, 0, 0, &strides, codec)?;
        Ok(out)
    }

    fn write_constructor_group<C>(
        &self,
        out: &mut String,
        depth: usize,
        base: usize,
        strides: &[usize],
        codec: &C,
    ) -> Result<()>
    where
        C: ElementCodec<Value = T>,
    {
        out.push('[');
        for i in 0..self.dims[depth].len {
            if i > 0 {
                out.push(',');
            }
            let offset = base + i * strides[depth];
            if depth + 1 < self.dims.len() {
                self.write_constructor_group(out, depth + 1, offset, strides, codec)?;
            } else {
                match &self.elements[offset] {
                    None => out.push_str("NULL"),
                    Some(value) => out.push_str(&codec.serialize_sql(value)?),
                }
            }
        }
        out.push(']');
        Ok(())
    }
}

/// Nested builder input for [`Array::from_nested`].
///
/// `List` children are positional with the default lower bound of 1;
/// `Keyed` children carry explicit indices to express custom bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum Nested<T> {
    Leaf(Option<T>),
    List(Vec<Nested<T>>),
    Keyed(Vec<(i64, Nested<T>)>),
}

fn shape_of<T>(node: &Nested<T>, dims: &mut Vec<Dim>) -> Result<()> {
    match node {
        Nested::Leaf(_) => Ok(()),
        Nested::List(children) => {
            dims.push(Dim::new(children.len()));
            match children.first() {
                Some(first) => shape_of(first, dims),
                None => Ok(()),
            }
        }
        Nested::Keyed(children) => {
            let lower = children.first().map_or(1, |(index, _)| *index);
            dims.push(Dim::with_lower(lower, children.len()));
            match children.first() {
                Some((_, first)) => shape_of(first, dims),
                None => Ok(()),
            }
        }
    }
}

fn flatten<T>(
    node: Nested<T>,
    level: usize,
    dims: &[Dim],
    out: &mut Vec<Option<T>>,
) -> Result<()> {
    if level == dims.len() {
        return match node {
            Nested::Leaf(value) => {
                out.push(value);
                Ok(())
            }
            Nested::List(children) => Err(Error::dimension_mismatch(0, children.len())),
            Nested::Keyed(children) => Err(Error::dimension_mismatch(0, children.len())),
        };
    }
    let expected = dims[level];
    match node {
        Nested::Leaf(_) => Err(Error::dimension_mismatch(expected.len, 0)),
        Nested::List(children) => {
            if children.len() != expected.len {
                return Err(Error::dimension_mismatch(expected.len, children.len()));
            }
            if expected.lower != 1 {
                return Err(Error::non_contiguous_index(level, expected.lower, 1));
            }
            for child in children {
                flatten(child, level + 1, dims, out)?;
            }
            Ok(())
        }
        Nested::Keyed(children) => {
            if children.len() != expected.len {
                return Err(Error::dimension_mismatch(expected.len, children.len()));
            }
            for (i, (index, child)) in children.into_iter().enumerate() {
                let want = expected.lower + i as i64;
                if index != want {
                    return Err(Error::non_contiguous_index(level, want, index));
                }
                flatten(child, level + 1, dims, out)?;
            }
            Ok(())
        }
    }
}

/// Parses an array literal with the given element codec and options.
///
/// See [`crate::parse_array`] for the default-options form.
pub fn parse_with<C>(text: &str, codec: &C, options: &ArrayOptions) -> Result<Array<C::Value>>
where
    C: ElementCodec,
{
    let mut s = Scanner::new(text);
    s.skip_whitespace();
    let decor = parse_decoration(&mut s)?;
    s.skip_whitespace();
    let brace_pos = s.pos();
    s.expect('{')?;

    let ndim = if decor.is_empty() {
        1 + count_leading_braces(&s)
    } else {
        decor.len()
    };
    if ndim > options.max_depth {
        return Err(Error::syntax(
            brace_pos,
            format!(
                "number of dimensions ({ndim}) exceeds the maximum allowed ({})",
                options.max_depth
            ),
        ));
    }

    let mut lengths: Vec<Option<usize>> = vec![None; ndim];
    let mut elements = Vec::new();
    parse_group(&mut s, 0, ndim, &mut lengths, &mut elements, codec)?;
    s.expect_end()?;

    for (depth, dim) in decor.iter().enumerate() {
        let actual = lengths[depth].unwrap_or(0);
        if actual != dim.len {
            return Err(Error::dimension_mismatch(dim.len, actual));
        }
    }
    if elements.is_empty() {
        return Ok(Array::empty());
    }
    let dims = (0..ndim)
        .map(|depth| Dim {
            lower: decor.get(depth).map_or(1, |d| d.lower),
            len: lengths[depth].unwrap_or(0),
        })
        .collect();
    Array::new(dims, elements)
}

fn parse_decoration(s: &mut Scanner<'_>) -> Result<Vec<Dim>> {
    let mut decor = Vec::new();
    if s.peek() != Some('[') {
        return Ok(decor);
    }
    while s.eat('[') {
        s.skip_whitespace();
        let lower = s.scan_int()?;
        s.skip_whitespace();
        s.expect(':')?;
        s.skip_whitespace();
        let upper = s.scan_int()?;
        s.skip_whitespace();
        s.expect(']')?;
        let len = upper
            .checked_sub(lower)
            .and_then(|span| span.checked_add(1))
            .filter(|len| *len > 0)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(Error::InvalidBounds { lower, upper })?;
        decor.push(Dim { lower, len });
        s.skip_whitespace();
    }
    s.expect('=')?;
    s.skip_whitespace();
    Ok(decor)
}

/// Counts further `{` immediately inside an already-consumed `{`, deciding
/// the dimensionality of an undecorated literal once up front.
fn count_leading_braces(s: &Scanner<'_>) -> usize {
    let mut probe = s.clone();
    let mut depth = 0;
    loop {
        probe.skip_whitespace();
        if probe.eat('{') {
            depth += 1;
        } else {
            break;
        }
    }
    depth
}

fn parse_group<C>(
    s: &mut Scanner<'_>,
    depth: usize,
    ndim: usize,
    lengths: &mut [Option<usize>],
    elements: &mut Vec<Option<C::Value>>,
    codec: &C,
) -> Result<()>
where
    C: ElementCodec,
{
    // The opening '{' has already been consumed by the caller.
    s.skip_whitespace();
    let mut count = 0;
    if !s.eat('}') {
        loop {
            if depth + 1 < ndim {
                s.skip_whitespace();
                s.expect('{')?;
                parse_group(s, depth + 1, ndim, lengths, elements, codec)?;
            } else {
                match s.scan_token(&ARRAY_RULES)? {
                    RawToken::Null => elements.push(None),
                    RawToken::Empty => {
                        return Err(Error::syntax(s.pos(), "empty array element"));
                    }
                    RawToken::Unquoted(text) | RawToken::Quoted(text) => {
                        elements.push(Some(codec.parse(&text)?));
                    }
                }
            }
            count += 1;
            s.skip_whitespace();
            let sep_pos = s.pos();
            match s.bump() {
                Some(',') => {}
                Some('}') => break,
                Some(ch) => {
                    return Err(Error::syntax(
                        sep_pos,
                        format!("expected ',' or '}}', found '{ch}'"),
                    ));
                }
                None => return Err(Error::syntax(sep_pos, "unexpected end of input")),
            }
        }
    }
    match lengths[depth] {
        None => lengths[depth] = Some(count),
        Some(expected) if expected != count => {
            return Err(Error::dimension_mismatch(expected, count));
        }
        Some(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{FromStrCodec, TextCodec};

    fn int_codec() -> FromStrCodec<i64> {
        FromStrCodec::new()
    }

    #[test]
    fn test_parse_flat() {
        let array = parse_with("{1,2,3}", &int_codec(), &ArrayOptions::default()).unwrap();
        assert_eq!(array.dims(), &[Dim::new(3)]);
        assert_eq!(array.elements(), &[Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_parse_empty() {
        let array = parse_with("{}", &int_codec(), &ArrayOptions::default()).unwrap();
        assert_eq!(array, Array::empty());
        assert_eq!(array.ndim(), 0);
    }

    #[test]
    fn test_parse_nested_with_nulls() {
        let array =
            parse_with("{{1,NULL},{3,4}}", &int_codec(), &ArrayOptions::default()).unwrap();
        assert_eq!(array.dims(), &[Dim::new(2), Dim::new(2)]);
        assert_eq!(array.elements(), &[Some(1), None, Some(3), Some(4)]);
    }

    #[test]
    fn test_parse_whitespace_tolerance() {
        let array = parse_with(
            " { { 1 , 2 } , { 3 , 4 } } ",
            &int_codec(),
            &ArrayOptions::default(),
        )
        .unwrap();
        assert_eq!(array.elements(), &[Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_parse_dimension_mismatch() {
        let err =
            parse_with("{{1,2,3},{4,5}}", &int_codec(), &ArrayOptions::default()).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(3, 2));
    }

    #[test]
    fn test_parse_bounds_decoration() {
        let array = parse_with(
            "[0:1][-3:-1]={{1,2,3},{4,5,6}}",
            &int_codec(),
            &ArrayOptions::default(),
        )
        .unwrap();
        assert_eq!(
            array.dims(),
            &[Dim::with_lower(0, 2), Dim::with_lower(-3, 3)]
        );
        assert_eq!(array.get(&[0, -2]), Some(&Some(2)));
    }

    #[test]
    fn test_parse_decoration_length_mismatch() {
        let err = parse_with("[1:3]={1,2}", &int_codec(), &ArrayOptions::default()).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(3, 2));
    }

    #[test]
    fn test_parse_invalid_bounds() {
        let err = parse_with("[5:1]={1}", &int_codec(), &ArrayOptions::default()).unwrap_err();
        assert_eq!(err, Error::invalid_bounds(5, 1));
    }

    #[test]
    fn test_parse_decorated_empty_body() {
        let err = parse_with("[1:2]={}", &int_codec(), &ArrayOptions::default()).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(2, 0));
    }

    #[test]
    fn test_parse_null_vs_quoted_null() {
        let array =
            parse_with("{NULL,\"NULL\"}", &TextCodec, &ArrayOptions::default()).unwrap();
        assert_eq!(array.elements(), &[None, Some("NULL".to_string())]);
    }

    #[test]
    fn test_parse_depth_guard() {
        let options = ArrayOptions::new().with_max_depth(2);
        let err = parse_with("{{{1}}}", &int_codec(), &options).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_parse_trailing_garbage() {
        let err = parse_with("{1,2} x", &int_codec(), &ArrayOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_parse_unbalanced() {
        assert!(parse_with("{1,2", &int_codec(), &ArrayOptions::default()).is_err());
        assert!(parse_with("{{1},2}", &int_codec(), &ArrayOptions::default()).is_err());
    }

    #[test]
    fn test_serialize_literal_plain() {
        let array = Array::new(vec![Dim::new(3)], vec![Some(1), None, Some(3)]).unwrap();
        assert_eq!(array.to_text(&int_codec()).unwrap(), "{1,NULL,3}");
    }

    #[test]
    fn test_serialize_literal_decoration() {
        let array = Array::new(
            vec![Dim::with_lower(0, 2), Dim::with_lower(-3, 3)],
            (1..=6).map(Some).collect(),
        )
        .unwrap();
        let text = array.to_text(&int_codec()).unwrap();
        assert!(text.starts_with("[0:1][-3:-1]="));
        assert_eq!(text, "[0:1][-3:-1]={{1,2,3},{4,5,6}}");
    }

    #[test]
    fn test_serialize_quoting() {
        let array = Array::new(
            vec![Dim::new(4)],
            vec![
                Some("a,b".to_string()),
                Some("".to_string()),
                Some("null".to_string()),
                Some("plain".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            array.to_text(&TextCodec).unwrap(),
            "{\"a,b\",\"\",\"null\",plain}"
        );
    }

    #[test]
    fn test_serialize_cast() {
        let array = Array::new(vec![Dim::new(2)], vec![Some(1), Some(2)]).unwrap();
        let options = ArrayOptions::new().with_cast("int4[]");
        assert_eq!(
            array.to_text_with(&int_codec(), &options).unwrap(),
            "'{1,2}'::int4[]"
        );
    }

    #[test]
    fn test_serialize_constructor() {
        let array = Array::new(
            vec![Dim::new(2), Dim::new(2)],
            vec![Some(1), Some(2), Some(3), Some(4)],
        )
        .unwrap();
        let options = ArrayOptions::new().with_mode(OutputMode::Constructor);
        assert_eq!(
            array.to_text_with(&int_codec(), &options).unwrap(),
            "ARRAY[['1','2'],['3','4']]"
        );
    }

    #[test]
    fn test_constructor_bounds_loss_policies() {
        let array =
            Array::new(vec![Dim::with_lower(0, 2)], vec![Some(1), Some(2)]).unwrap();
        let strict = ArrayOptions::new().with_mode(OutputMode::Constructor);
        assert_eq!(
            array.to_text_with(&int_codec(), &strict).unwrap_err(),
            Error::BoundsLoss
        );
        let lossy = strict.with_bounds_policy(BoundsPolicy::Drop);
        assert_eq!(
            array.to_text_with(&int_codec(), &lossy).unwrap(),
            "ARRAY['1','2']"
        );
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(Array::<i64>::empty().to_text(&int_codec()).unwrap(), "{}");
        let options = ArrayOptions::new().with_mode(OutputMode::Constructor);
        assert_eq!(
            Array::<i64>::empty()
                .to_text_with(&int_codec(), &options)
                .unwrap(),
            "ARRAY[]"
        );
    }

    #[test]
    fn test_round_trip_custom_bounds() {
        let text = "[0:1][-3:-1]={{1,2,3},{4,5,6}}";
        let array = parse_with(text, &int_codec(), &ArrayOptions::default()).unwrap();
        assert_eq!(array.to_text(&int_codec()).unwrap(), text);
    }

    #[test]
    fn test_from_nested_positional() {
        let array = Array::from_nested(Nested::List(vec![
            Nested::List(vec![Nested::Leaf(Some(1)), Nested::Leaf(Some(2))]),
            Nested::List(vec![Nested::Leaf(Some(3)), Nested::Leaf(Some(4))]),
        ]))
        .unwrap();
        assert_eq!(array.dims(), &[Dim::new(2), Dim::new(2)]);
    }

    #[test]
    fn test_from_nested_keyed_bounds() {
        let inner = |values: [i64; 3]| {
            Nested::Keyed(
                (-3..0)
                    .zip(values)
                    .map(|(index, value)| (index, Nested::Leaf(Some(value))))
                    .collect(),
            )
        };
        let array = Array::from_nested(Nested::Keyed(vec![
            (0, inner([1, 2, 3])),
            (1, inner([4, 5, 6])),
        ]))
        .unwrap();
        assert_eq!(
            array.dims(),
            &[Dim::with_lower(0, 2), Dim::with_lower(-3, 3)]
        );
        let text = array.to_text(&int_codec()).unwrap();
        assert!(text.starts_with("[0:1][-3:-1]="));
    }

    #[test]
    fn test_from_nested_ragged_length() {
        let err = Array::from_nested(Nested::List(vec![
            Nested::List(vec![Nested::Leaf(Some(1))]),
            Nested::List(vec![Nested::Leaf(Some(2)), Nested::Leaf(Some(3))]),
        ]))
        .unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(1, 2));
    }

    #[test]
    fn test_from_nested_non_contiguous() {
        let err = Array::from_nested(Nested::Keyed(vec![
            (1, Nested::Leaf(Some(1))),
            (3, Nested::Leaf(Some(2))),
        ]))
        .unwrap_err();
        assert_eq!(err, Error::non_contiguous_index(0, 2, 3));
    }

    #[test]
    fn test_new_rejects_wrong_flat_length() {
        let err = Array::new(vec![Dim::new(2), Dim::new(3)], vec![Some(1)]).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch(6, 1));
    }
}
