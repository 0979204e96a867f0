//! Primary-key ranges and scan orderings.
//!
//! The query layer turns predicates on the primary key into a [`DatumRange`]
//! and the requested ordering into a [`Sorting`]; backends and the default
//! scan adaptor use both to restrict and order a table scan.

use crate::datum::Datum;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::ops::Bound;
use strum::{Display, EnumIter, EnumString};

/// Requested order of a scan's output, over primary-key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    /// Any order the backend finds convenient, stable within one call.
    #[default]
    Unordered,
    Ascending,
    Descending,
}

impl Sorting {
    /// Returns true if the caller asked for a definite order
    pub fn is_ordered(self) -> bool {
        self != Sorting::Unordered
    }

    /// Compare two primary keys under this sorting
    ///
    /// `Unordered` treats every pair as equal, so a stable sort keeps the
    /// input order.
    pub fn compare(self, a: &Datum, b: &Datum) -> Ordering {
        match self {
            Sorting::Unordered => Ordering::Equal,
            Sorting::Ascending => a.cmp(b),
            Sorting::Descending => b.cmp(a),
        }
    }
}

/// A range over primary-key order.
///
/// A `None` bound leaves that side open. Each bound carries its own
/// inclusivity flag, which is ignored when the bound is open.
///
/// On the wire an open bound is an absent field, so a bound on the `null`
/// key (`"upper": null`) stays distinct from no bound at all.
///
/// # Example
///
/// ```
/// use artable_store::datum::Datum;
/// use artable_store::range::DatumRange;
///
/// // [b, d)
/// let range = DatumRange::between(Datum::from("b"), Datum::from("d"));
/// assert!(range.contains(&Datum::from("b")));
/// assert!(range.contains(&Datum::from("c")));
/// assert!(!range.contains(&Datum::from("d")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatumRange {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_bound")]
    pub lower: Option<Datum>,
    pub lower_inclusive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_bound")]
    pub upper: Option<Datum>,
    pub upper_inclusive: bool,
}

/// A bound field that is present is a bound, even when its value is `null`
fn present_bound<'de, D>(deserializer: D) -> Result<Option<Datum>, D::Error>
where
    D: Deserializer<'de>,
{
    Datum::deserialize(deserializer).map(Some)
}

impl Default for DatumRange {
    fn default() -> Self {
        Self::universe()
    }
}

impl DatumRange {
    /// The range containing every key
    pub fn universe() -> Self {
        Self {
            lower: None,
            lower_inclusive: true,
            upper: None,
            upper_inclusive: true,
        }
    }

    /// Left-closed, right-open range `[lower, upper)`
    pub fn between(lower: Datum, upper: Datum) -> Self {
        Self::universe().with_lower(lower, true).with_upper(upper, false)
    }

    /// The range containing only `key`
    pub fn exactly(key: Datum) -> Self {
        Self::universe().with_lower(key.clone(), true).with_upper(key, true)
    }

    /// Keys `>= key`
    pub fn at_least(key: Datum) -> Self {
        Self::universe().with_lower(key, true)
    }

    /// Keys `> key`
    pub fn greater_than(key: Datum) -> Self {
        Self::universe().with_lower(key, false)
    }

    /// Keys `<= key`
    pub fn at_most(key: Datum) -> Self {
        Self::universe().with_upper(key, true)
    }

    /// Keys `< key`
    pub fn less_than(key: Datum) -> Self {
        Self::universe().with_upper(key, false)
    }

    /// Replace the lower bound.
    ///
    /// ```
    /// use artable_store::datum::Datum;
    /// use artable_store::range::DatumRange;
    ///
    /// let range = DatumRange::universe().with_lower(Datum::from(5), false);
    /// assert!(!range.contains(&Datum::from(5)));
    /// assert!(range.contains(&Datum::from(6)));
    /// ```
    pub fn with_lower(mut self, key: Datum, inclusive: bool) -> Self {
        self.lower = Some(key);
        self.lower_inclusive = inclusive;
        self
    }

    /// Replace the upper bound.
    pub fn with_upper(mut self, key: Datum, inclusive: bool) -> Self {
        self.upper = Some(key);
        self.upper_inclusive = inclusive;
        self
    }

    /// Returns true if neither side is bounded
    pub fn is_universe(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Returns true if no key can satisfy both bounds
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => match lower.cmp(upper) {
                Ordering::Greater => true,
                Ordering::Equal => !(self.lower_inclusive && self.upper_inclusive),
                Ordering::Less => false,
            },
            _ => false,
        }
    }

    /// Returns true if `key` lies inside the range
    pub fn contains(&self, key: &Datum) -> bool {
        let above_lower = match &self.lower {
            None => true,
            Some(lower) if self.lower_inclusive => key >= lower,
            Some(lower) => key > lower,
        };
        let below_upper = match &self.upper {
            None => true,
            Some(upper) if self.upper_inclusive => key <= upper,
            Some(upper) => key < upper,
        };
        above_lower && below_upper
    }

    /// The range as a pair of std bounds, usable with `BTreeMap::range`
    ///
    /// `BTreeMap::range` panics on an empty range; check [`is_empty`] first.
    ///
    /// [`is_empty`]: DatumRange::is_empty
    pub fn bounds(&self) -> (Bound<&Datum>, Bound<&Datum>) {
        let lower = match &self.lower {
            None => Bound::Unbounded,
            Some(key) if self.lower_inclusive => Bound::Included(key),
            Some(key) => Bound::Excluded(key),
        };
        let upper = match &self.upper {
            None => Bound::Unbounded,
            Some(key) if self.upper_inclusive => Bound::Included(key),
            Some(key) => Bound::Excluded(key),
        };
        (lower, upper)
    }
}
