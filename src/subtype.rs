//! Built-in range subtypes.
//!
//! A [`RangeSubtype`] supplies the total order of a range's element type,
//! and, for discrete types, the `step` primitive that powers bound
//! canonicalization and inclusivity conversion. Integer, big-integer, and
//! date ranges are discrete and canonicalize to the `[inclusive,
//! exclusive)` convention; float, timestamp, and text ranges are continuous
//! and keep their bounds as written.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{DateSubtype, RangeBound, RangeType};
//! use chrono::NaiveDate;
//!
//! let ty = RangeType::new(DateSubtype);
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//!
//! // (Jan 1, Jan 5] canonicalizes to [Jan 2, Jan 6).
//! let r = ty.range(
//!     Some(RangeBound::exclusive(day(1))),
//!     Some(RangeBound::inclusive(day(5))),
//! );
//! assert_eq!(r.lower().unwrap().value, day(2));
//! assert_eq!(r.upper().unwrap().value, day(6));
//! ```

use crate::range::RangeSubtype;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use num_bigint::BigInt;
use std::cmp::Ordering;

/// Discrete `i64` subtype with unit step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntSubtype;

impl RangeSubtype for IntSubtype {
    type Value = i64;

    fn cmp_values(&self, a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn step(&self, value: &i64, delta: i64) -> Option<i64> {
        value.checked_add(delta)
    }
}

/// Continuous `f64` subtype ordered by IEEE 754 total order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatSubtype;

impl RangeSubtype for FloatSubtype {
    type Value = f64;

    fn cmp_values(&self, a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }
}

/// Discrete arbitrary-precision integer subtype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BigIntSubtype;

impl RangeSubtype for BigIntSubtype {
    type Value = BigInt;

    fn cmp_values(&self, a: &BigInt, b: &BigInt) -> Ordering {
        a.cmp(b)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn step(&self, value: &BigInt, delta: i64) -> Option<BigInt> {
        Some(value.clone() + BigInt::from(delta))
    }
}

/// Discrete calendar-date subtype with a one-day step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateSubtype;

impl RangeSubtype for DateSubtype {
    type Value = NaiveDate;

    fn cmp_values(&self, a: &NaiveDate, b: &NaiveDate) -> Ordering {
        a.cmp(b)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn step(&self, value: &NaiveDate, delta: i64) -> Option<NaiveDate> {
        value.checked_add_signed(Duration::days(delta))
    }
}

/// Continuous UTC timestamp subtype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimestampSubtype;

impl RangeSubtype for TimestampSubtype {
    type Value = DateTime<Utc>;

    fn cmp_values(&self, a: &DateTime<Utc>, b: &DateTime<Utc>) -> Ordering {
        a.cmp(b)
    }
}

/// Continuous text subtype ordered bytewise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextSubtype;

impl RangeSubtype for TextSubtype {
    type Value = String;

    fn cmp_values(&self, a: &String, b: &String) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Range, RangeBound, RangeType};

    #[test]
    fn test_int_step_overflow_keeps_bound() {
        let ty = RangeType::new(IntSubtype);
        // The upper bound cannot step past i64::MAX; canonicalization keeps
        // it inclusive rather than inventing a value.
        let r = ty.range(
            Some(RangeBound::inclusive(0)),
            Some(RangeBound::inclusive(i64::MAX)),
        );
        assert_eq!(r.upper().unwrap().value, i64::MAX);
        assert!(r.upper().unwrap().inclusive);
    }

    #[test]
    fn test_bigint_range_is_discrete() {
        let ty = RangeType::new(BigIntSubtype);
        let r = ty.range(
            Some(RangeBound::exclusive(BigInt::from(10))),
            Some(RangeBound::inclusive(BigInt::from(12))),
        );
        assert_eq!(
            r,
            Range::Bounded {
                lower: Some(RangeBound::inclusive(BigInt::from(11))),
                upper: Some(RangeBound::exclusive(BigInt::from(13))),
            }
        );
        assert!(ty.is_single_point(&ty.range(
            Some(RangeBound::inclusive(BigInt::from(7))),
            Some(RangeBound::inclusive(BigInt::from(7))),
        ))
        .unwrap());
    }

    #[test]
    fn test_date_subtype_steps_days() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert_eq!(DateSubtype.step(&day(1), 1), Some(day(2)));
        assert_eq!(DateSubtype.step(&day(2), -1), Some(day(1)));
    }

    #[test]
    fn test_float_subtype_is_continuous() {
        let ty = RangeType::new(FloatSubtype);
        let r = ty.range(
            Some(RangeBound::exclusive(1.0)),
            Some(RangeBound::inclusive(2.0)),
        );
        // No canonicalization: bounds stay exactly as written.
        assert_eq!(r.lower().unwrap().inclusive, false);
        assert_eq!(r.upper().unwrap().inclusive, true);
    }

    #[test]
    fn test_timestamp_order() {
        let a = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let b = a + Duration::hours(1);
        assert_eq!(TimestampSubtype.cmp_values(&a, &b), Ordering::Less);
    }
}
