//! Range values, the order algebra, and the range literal codec.
//!
//! A [`Range`] is a tagged union: `Empty`, or `Bounded` with optional lower
//! and upper bounds. An absent bound means unbounded in that direction and
//! is by definition exclusive. Construction always goes through
//! [`RangeType::range`], the single normalize path: a bounded range whose
//! lower bound exceeds its upper (or equals it without both ends inclusive)
//! collapses to `Empty`, the subtype's canonical function is applied once,
//! and emptiness is re-validated afterward — the two-phase check defends
//! against a misbehaving canonical function.
//!
//! Comparison semantics follow the engine: `contains_element` propagates
//! null input as null (tri-state [`Option<bool>`]), and the empty range is
//! contained in every range, including itself.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{IntSubtype, Range, RangeBound, RangeType};
//!
//! let ty = RangeType::new(IntSubtype);
//!
//! // Integer ranges canonicalize to the [inclusive, exclusive) convention.
//! let r = ty.range(
//!     Some(RangeBound::exclusive(1)),
//!     Some(RangeBound::inclusive(4)),
//! );
//! assert_eq!(
//!     r,
//!     Range::Bounded {
//!         lower: Some(RangeBound::inclusive(2)),
//!         upper: Some(RangeBound::exclusive(5)),
//!     }
//! );
//!
//! // Bounds in the wrong order collapse to Empty.
//! let e = ty.range(
//!     Some(RangeBound::inclusive(5)),
//!     Some(RangeBound::inclusive(4)),
//! );
//! assert_eq!(e, Range::Empty);
//! assert!(ty.contains_range(&r, &e));
//! ```

use crate::codec::ElementCodec;
use crate::scan::{self, Scanner, RawToken, RANGE_RULES};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Characters that force quoting of range bound text.
const RANGE_SPECIALS: &[char] = &[',', '[', ']', '(', ')'];

/// One end of a bounded range: the bound value and its inclusivity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBound<T> {
    pub value: T,
    pub inclusive: bool,
}

impl<T> RangeBound<T> {
    #[must_use]
    pub fn inclusive(value: T) -> Self {
        RangeBound {
            value,
            inclusive: true,
        }
    }

    #[must_use]
    pub fn exclusive(value: T) -> Self {
        RangeBound {
            value,
            inclusive: false,
        }
    }
}

/// A range value over some subtype's order.
///
/// `None` in a `Bounded` position means unbounded in that direction.
/// Immutable; every operation returns a new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Range<T> {
    #[default]
    Empty,
    Bounded {
        lower: Option<RangeBound<T>>,
        upper: Option<RangeBound<T>>,
    },
}

impl<T> Range<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Range::Empty)
    }

    /// The lower bound, if the range is bounded below.
    #[must_use]
    pub fn lower(&self) -> Option<&RangeBound<T>> {
        match self {
            Range::Empty => None,
            Range::Bounded { lower, .. } => lower.as_ref(),
        }
    }

    /// The upper bound, if the range is bounded above.
    #[must_use]
    pub fn upper(&self) -> Option<&RangeBound<T>> {
        match self {
            Range::Empty => None,
            Range::Bounded { upper, .. } => upper.as_ref(),
        }
    }
}

/// The order (and optionally the discrete step/canonical structure) of a
/// range's element type.
///
/// A subtype must provide a total order. Discrete subtypes additionally
/// provide `step`, which enables bound-inclusivity canonicalization,
/// [`RangeType::is_single_point`], and [`RangeType::with_bounds`].
pub trait RangeSubtype {
    type Value;

    /// Total-order comparison of two element values.
    fn cmp_values(&self, a: &Self::Value, b: &Self::Value) -> Ordering;

    /// Whether the subtype supports `step`.
    fn is_discrete(&self) -> bool {
        false
    }

    /// Shifts a value by `delta` steps; `None` when the result is not
    /// representable. Discrete subtypes only.
    fn step(&self, value: &Self::Value, delta: i64) -> Option<Self::Value> {
        let _ = (value, delta);
        None
    }

    /// Normalizes bound inclusivity to the subtype's fixed convention.
    ///
    /// The default converts discrete bounds to `[inclusive, exclusive)` via
    /// one `step` call per bound, and is the identity for continuous
    /// subtypes. Applied exactly once, at construction.
    fn canonical(
        &self,
        lower: Option<RangeBound<Self::Value>>,
        upper: Option<RangeBound<Self::Value>>,
    ) -> (Option<RangeBound<Self::Value>>, Option<RangeBound<Self::Value>>) {
        if !self.is_discrete() {
            return (lower, upper);
        }
        let lower = match lower {
            Some(bound) if !bound.inclusive => match self.step(&bound.value, 1) {
                Some(value) => Some(RangeBound::inclusive(value)),
                None => Some(bound),
            },
            other => other,
        };
        let upper = match upper {
            Some(bound) if bound.inclusive => match self.step(&bound.value, 1) {
                Some(value) => Some(RangeBound::exclusive(value)),
                None => Some(bound),
            },
            other => other,
        };
        (lower, upper)
    }
}

/// Which end of a range a bound belongs to; decides how an absent bound and
/// an exclusivity tie are ordered.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
}

/// Per-type configuration for one range type: the subtype order plus its
/// optional discrete structure. Set up once at type registration and then
/// read-only, so it can be shared freely across threads.
///
/// All range operations live here so that every constructed `Bounded` value
/// has passed through the same normalize path.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeType<S> {
    subtype: S,
}

impl<S: RangeSubtype> RangeType<S> {
    #[must_use]
    pub fn new(subtype: S) -> Self {
        RangeType { subtype }
    }

    #[must_use]
    pub fn subtype(&self) -> &S {
        &self.subtype
    }

    /// Constructs a range, normalizing per the subtype.
    ///
    /// This is the only path to a `Bounded` value: emptiness is checked,
    /// the canonical function is applied once, and emptiness is checked
    /// again on its output.
    pub fn range(
        &self,
        lower: Option<RangeBound<S::Value>>,
        upper: Option<RangeBound<S::Value>>,
    ) -> Range<S::Value> {
        if self.bounds_empty(lower.as_ref(), upper.as_ref()) {
            return Range::Empty;
        }
        let (lower, upper) = self.subtype.canonical(lower, upper);
        if self.bounds_empty(lower.as_ref(), upper.as_ref()) {
            return Range::Empty;
        }
        Range::Bounded { lower, upper }
    }

    /// The empty range.
    #[must_use]
    pub fn empty(&self) -> Range<S::Value> {
        Range::Empty
    }

    fn bounds_empty(
        &self,
        lower: Option<&RangeBound<S::Value>>,
        upper: Option<&RangeBound<S::Value>>,
    ) -> bool {
        match (lower, upper) {
            (Some(lo), Some(hi)) => match self.subtype.cmp_values(&lo.value, &hi.value) {
                Ordering::Greater => true,
                Ordering::Equal => !(lo.inclusive && hi.inclusive),
                Ordering::Less => false,
            },
            _ => false,
        }
    }

    /// Compares two bounds, treating an absent lower bound as below all
    /// values and an absent upper bound as above all. Equal finite values
    /// are tie-broken by inclusivity: an exclusive lower bound starts just
    /// after its value, an exclusive upper bound ends just before it.
    fn cmp_bounds(
        &self,
        a: Option<&RangeBound<S::Value>>,
        a_side: Side,
        b: Option<&RangeBound<S::Value>>,
        b_side: Side,
    ) -> Ordering {
        match (a, b) {
            (None, None) => match (a_side, b_side) {
                (Side::Lower, Side::Lower) | (Side::Upper, Side::Upper) => Ordering::Equal,
                (Side::Lower, Side::Upper) => Ordering::Less,
                (Side::Upper, Side::Lower) => Ordering::Greater,
            },
            (None, Some(_)) => match a_side {
                Side::Lower => Ordering::Less,
                Side::Upper => Ordering::Greater,
            },
            (Some(_), None) => match b_side {
                Side::Lower => Ordering::Greater,
                Side::Upper => Ordering::Less,
            },
            (Some(a), Some(b)) => self
                .subtype
                .cmp_values(&a.value, &b.value)
                .then_with(|| bound_nudge(a, a_side).cmp(&bound_nudge(b, b_side))),
        }
    }

    /// Whether the range contains the element, with SQL null propagation:
    /// a null input yields `None`.
    pub fn contains_element(&self, range: &Range<S::Value>, x: Option<&S::Value>) -> Option<bool> {
        let x = x?;
        let (lower, upper) = match range {
            Range::Empty => return Some(false),
            Range::Bounded { lower, upper } => (lower, upper),
        };
        if let Some(lo) = lower {
            match self.subtype.cmp_values(&lo.value, x) {
                Ordering::Greater => return Some(false),
                Ordering::Equal if !lo.inclusive => return Some(false),
                _ => {}
            }
        }
        if let Some(hi) = upper {
            match self.subtype.cmp_values(&hi.value, x) {
                Ordering::Less => return Some(false),
                Ordering::Equal if !hi.inclusive => return Some(false),
                _ => {}
            }
        }
        Some(true)
    }

    /// Whether `range` contains all of `other`. The empty range is contained
    /// in every range, including the empty one.
    pub fn contains_range(&self, range: &Range<S::Value>, other: &Range<S::Value>) -> bool {
        let (other_lower, other_upper) = match other {
            Range::Empty => return true,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let (lower, upper) = match range {
            Range::Empty => return false,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        self.cmp_bounds(lower.as_ref(), Side::Lower, other_lower.as_ref(), Side::Lower)
            != Ordering::Greater
            && self.cmp_bounds(upper.as_ref(), Side::Upper, other_upper.as_ref(), Side::Upper)
                != Ordering::Less
    }

    /// Whether the two ranges share at least one element. Empty on either
    /// side short-circuits to false.
    pub fn overlaps(&self, a: &Range<S::Value>, b: &Range<S::Value>) -> bool {
        let (a_lower, a_upper) = match a {
            Range::Empty => return false,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let (b_lower, b_upper) = match b {
            Range::Empty => return false,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        self.cmp_bounds(a_lower.as_ref(), Side::Lower, b_upper.as_ref(), Side::Upper)
            != Ordering::Greater
            && self.cmp_bounds(b_lower.as_ref(), Side::Lower, a_upper.as_ref(), Side::Upper)
                != Ordering::Greater
    }

    /// The intersection of two ranges; empty when they do not overlap.
    pub fn intersect(&self, a: &Range<S::Value>, b: &Range<S::Value>) -> Range<S::Value>
    where
        S::Value: Clone,
    {
        let (a_lower, a_upper) = match a {
            Range::Empty => return Range::Empty,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let (b_lower, b_upper) = match b {
            Range::Empty => return Range::Empty,
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let lower = if self.cmp_bounds(a_lower.as_ref(), Side::Lower, b_lower.as_ref(), Side::Lower)
            == Ordering::Greater
        {
            a_lower
        } else {
            b_lower
        };
        let upper = if self.cmp_bounds(a_upper.as_ref(), Side::Upper, b_upper.as_ref(), Side::Upper)
            == Ordering::Less
        {
            a_upper
        } else {
            b_upper
        };
        self.range(lower.clone(), upper.clone())
    }

    /// Whether `a` lies entirely below `b` with no shared element.
    pub fn strictly_left_of(&self, a: &Range<S::Value>, b: &Range<S::Value>) -> bool {
        let (a_upper, b_lower) = match (a, b) {
            (Range::Bounded { upper, .. }, Range::Bounded { lower, .. }) => (upper, lower),
            _ => return false,
        };
        self.cmp_bounds(a_upper.as_ref(), Side::Upper, b_lower.as_ref(), Side::Lower)
            == Ordering::Less
    }

    /// Whether `a` lies entirely above `b` with no shared element.
    pub fn strictly_right_of(&self, a: &Range<S::Value>, b: &Range<S::Value>) -> bool {
        self.strictly_left_of(b, a)
    }

    /// Whether the range contains exactly one element.
    ///
    /// Defined only for discrete subtypes: each bound is normalized to
    /// inclusive via one `step` call, then the two values are compared.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] for continuous subtypes.
    pub fn is_single_point(&self, range: &Range<S::Value>) -> Result<bool>
    where
        S::Value: Clone,
    {
        if !self.subtype.is_discrete() {
            return Err(Error::unsupported(
                "is_single_point requires a discrete subtype",
            ));
        }
        let (lower, upper) = match range {
            Range::Empty => return Ok(false),
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let (Some(lo), Some(hi)) = (lower, upper) else {
            return Ok(false);
        };
        let (Some(lo_value), Some(hi_value)) = (
            self.to_inclusive(lo, Side::Lower),
            self.to_inclusive(hi, Side::Upper),
        ) else {
            return Ok(false);
        };
        Ok(self.subtype.cmp_values(&lo_value, &hi_value) == Ordering::Equal)
    }

    fn to_inclusive(&self, bound: &RangeBound<S::Value>, side: Side) -> Option<S::Value>
    where
        S::Value: Clone,
    {
        if bound.inclusive {
            return Some(bound.value.clone());
        }
        let delta = match side {
            Side::Lower => 1,
            Side::Upper => -1,
        };
        self.subtype.step(&bound.value, delta)
    }

    /// Returns the same set of values with the requested bound
    /// inclusivities, shifting each present bound by one step where the
    /// stored inclusivity differs.
    ///
    /// Defined only for discrete subtypes.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] for continuous subtypes, or a custom
    /// error when a shifted bound is not representable.
    pub fn with_bounds(
        &self,
        range: &Range<S::Value>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Result<Range<S::Value>>
    where
        S::Value: Clone,
    {
        if !self.subtype.is_discrete() {
            return Err(Error::unsupported(
                "bound inclusivity conversion requires a discrete subtype",
            ));
        }
        let (lower, upper) = match range {
            Range::Empty => return Ok(Range::Empty),
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let lower = lower
            .as_ref()
            .map(|bound| self.shift_bound(bound, Side::Lower, lower_inclusive))
            .transpose()?;
        let upper = upper
            .as_ref()
            .map(|bound| self.shift_bound(bound, Side::Upper, upper_inclusive))
            .transpose()?;
        Ok(Range::Bounded { lower, upper })
    }

    fn shift_bound(
        &self,
        bound: &RangeBound<S::Value>,
        side: Side,
        inclusive: bool,
    ) -> Result<RangeBound<S::Value>>
    where
        S::Value: Clone,
    {
        if bound.inclusive == inclusive {
            return Ok(RangeBound {
                value: bound.value.clone(),
                inclusive,
            });
        }
        // Moving a lower bound from inclusive to exclusive steps down; the
        // other three conversions step up or mirror it.
        let delta = match (side, inclusive) {
            (Side::Lower, false) | (Side::Upper, true) => -1,
            (Side::Lower, true) | (Side::Upper, false) => 1,
        };
        let value = self
            .subtype
            .step(&bound.value, delta)
            .ok_or_else(|| Error::custom("bound conversion out of range"))?;
        Ok(RangeBound { value, inclusive })
    }

    /// Range equality under the subtype's own value equality: both empty,
    /// or identical bound presence, inclusivity, and compared-equal values.
    pub fn eq(&self, a: &Range<S::Value>, b: &Range<S::Value>) -> bool {
        let (a_lower, a_upper, b_lower, b_upper) = match (a, b) {
            (Range::Empty, Range::Empty) => return true,
            (
                Range::Bounded {
                    lower: a_lower,
                    upper: a_upper,
                },
                Range::Bounded {
                    lower: b_lower,
                    upper: b_upper,
                },
            ) => (a_lower, a_upper, b_lower, b_upper),
            _ => return false,
        };
        let bound_eq = |a: &Option<RangeBound<S::Value>>, b: &Option<RangeBound<S::Value>>| match (
            a, b,
        ) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.inclusive == b.inclusive
                    && self.subtype.cmp_values(&a.value, &b.value) == Ordering::Equal
            }
            _ => false,
        };
        bound_eq(a_lower, b_lower) && bound_eq(a_upper, b_upper)
    }

    /// Parses a range literal with the given element codec for bound values.
    ///
    /// The result is normalized through [`RangeType::range`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::{FromStrCodec, IntSubtype, Range, RangeType};
    ///
    /// let ty = RangeType::new(IntSubtype);
    /// let codec = FromStrCodec::<i64>::new();
    /// assert_eq!(ty.parse("empty", &codec).unwrap(), Range::Empty);
    /// assert_eq!(ty.parse("(3,3]", &codec).unwrap(), Range::Empty);
    /// let r = ty.parse("[1,10)", &codec).unwrap();
    /// assert_eq!(ty.contains_element(&r, Some(&9)), Some(true));
    /// ```
    pub fn parse<C>(&self, text: &str, codec: &C) -> Result<Range<S::Value>>
    where
        C: ElementCodec<Value = S::Value>,
    {
        let mut s = Scanner::new(text);
        s.skip_whitespace();
        if s.eat_ci("empty") {
            s.expect_end()?;
            return Ok(Range::Empty);
        }
        let open_pos = s.pos();
        let lower_inclusive = match s.bump() {
            Some('[') => true,
            Some('(') => false,
            _ => {
                return Err(Error::syntax(open_pos, "expected '[', '(', or 'empty'"));
            }
        };
        let lower = self.parse_bound(&mut s, codec, lower_inclusive)?;
        s.expect(',')?;
        let upper_inclusive_value = self.parse_bound(&mut s, codec, true)?;
        let close_pos = s.pos();
        let upper = match s.bump() {
            Some(']') => upper_inclusive_value,
            Some(')') => {
                upper_inclusive_value.map(|bound| RangeBound::exclusive(bound.value))
            }
            _ => return Err(Error::syntax(close_pos, "expected ']' or ')'")),
        };
        s.expect_end()?;
        Ok(self.range(lower, upper))
    }

    fn parse_bound<C>(
        &self,
        s: &mut Scanner<'_>,
        codec: &C,
        inclusive: bool,
    ) -> Result<Option<RangeBound<S::Value>>>
    where
        C: ElementCodec<Value = S::Value>,
    {
        match s.scan_token(&RANGE_RULES)? {
            RawToken::Empty | RawToken::Null => Ok(None),
            RawToken::Unquoted(text) | RawToken::Quoted(text) => Ok(Some(RangeBound {
                value: codec.parse(&text)?,
                inclusive,
            })),
        }
    }

    /// Serializes a range with the given element codec for bound values.
    ///
    /// Produces `empty` for the empty range; otherwise the bound texts are
    /// quoted whenever they contain structural characters, edge whitespace,
    /// or spell the `empty` keyword.
    pub fn to_text<C>(&self, range: &Range<S::Value>, codec: &C) -> Result<String>
    where
        C: ElementCodec<Value = S::Value>,
    {
        let (lower, upper) = match range {
            Range::Empty => return Ok("empty".to_string()),
            Range::Bounded { lower, upper } => (lower, upper),
        };
        let mut out = String::new();
        out.push(match lower {
            Some(bound) if bound.inclusive => '[',
            _ => '(',
        });
        if let Some(bound) = lower {
            self.write_bound_text(&mut out, bound, codec)?;
        }
        out.push(',');
        if let Some(bound) = upper {
            self.write_bound_text(&mut out, bound, codec)?;
        }
        out.push(match upper {
            Some(bound) if bound.inclusive => ']',
            _ => ')',
        });
        Ok(out)
    }

    fn write_bound_text<C>(
        &self,
        out: &mut String,
        bound: &RangeBound<S::Value>,
        codec: &C,
    ) -> Result<()>
    where
        C: ElementCodec<Value = S::Value>,
    {
        let text = codec.serialize(&bound.value)?;
        if scan::needs_quoting(&text, RANGE_SPECIALS, &["empty"]) {
            scan::quote_into(out, &text);
        } else {
            out.push_str(&text);
        }
        Ok(())
    }
}

/// Inclusivity nudge for equal bound values: an exclusive lower bound sits
/// just above its value, an exclusive upper bound just below.
fn bound_nudge<T>(bound: &RangeBound<T>, side: Side) -> i8 {
    match (side, bound.inclusive) {
        (_, true) => 0,
        (Side::Lower, false) => 1,
        (Side::Upper, false) => -1,
    }
}
