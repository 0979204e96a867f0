//! Total order over datums.
//!
//! Datums of different types order by type name: `ARRAY < BOOL < NULL <
//! NUMBER < OBJECT < STRING`. Within a type:
//!
//! - booleans: `false < true`
//! - numbers: numeric order, with `-0.0 == 0.0`
//! - strings: byte order
//! - arrays: element by element, a strict prefix first
//! - objects: as sequences of `(field, value)` pairs in field order
//!
//! Equality and hashing are derived from this order so that datums can key
//! both ordered and hashed maps.

use super::Datum;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Collapse `-0.0` onto `0.0` so the two compare and hash identically
#[inline]
fn normalize(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

impl Ord for Datum {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Datum::Null, Datum::Null) => Ordering::Equal,
            (Datum::Bool(a), Datum::Bool(b)) => a.cmp(b),
            (Datum::Number(a), Datum::Number(b)) => normalize(*a).total_cmp(&normalize(*b)),
            (Datum::String(a), Datum::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Datum::Array(a), Datum::Array(b)) => a.iter().cmp(b.iter()),
            (Datum::Object(a), Datum::Object(b)) => a.iter().cmp(b.iter()),
            _ => self.type_of().cmp(&other.type_of()),
        }
    }
}

impl PartialOrd for Datum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Datum {}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_of().hash(state);
        match self {
            Datum::Null => {}
            Datum::Bool(b) => b.hash(state),
            Datum::Number(n) => normalize(*n).to_bits().hash(state),
            Datum::String(s) => s.hash(state),
            Datum::Array(items) => items.hash(state),
            Datum::Object(fields) => fields.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::DatumType;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn sample(ty: DatumType) -> Datum {
        match ty {
            DatumType::Array => Datum::Array(vec![Datum::from(1)]),
            DatumType::Bool => Datum::Bool(true),
            DatumType::Null => Datum::Null,
            DatumType::Number => Datum::from(-5),
            DatumType::Object => Datum::object([("a", Datum::Null)]),
            DatumType::String => Datum::from(""),
        }
    }

    #[test]
    fn test_types_order_by_name() {
        let samples: Vec<Datum> = DatumType::iter().map(sample).collect();
        for pair in samples.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_numbers_order_numerically() {
        assert!(Datum::from(-1) < Datum::from(0));
        assert!(Datum::from(2) < Datum::from(10));
        assert!(Datum::Number(1.5) < Datum::from(2));
        assert_eq!(Datum::Number(-0.0), Datum::Number(0.0));
    }

    #[test]
    fn test_strings_order_bytewise() {
        assert!(Datum::from("B") < Datum::from("a"));
        assert!(Datum::from("a") < Datum::from("ab"));
    }

    #[test]
    fn test_arrays_order_lexicographically() {
        let short = Datum::Array(vec![Datum::from(1)]);
        let long = Datum::Array(vec![Datum::from(1), Datum::from(0)]);
        let bigger = Datum::Array(vec![Datum::from(2)]);
        assert!(short < long);
        assert!(long < bigger);
    }

    #[test]
    fn test_objects_order_by_pairs() {
        let a = Datum::object([("a", Datum::from(1))]);
        let b = Datum::object([("a", Datum::from(2))]);
        let c = Datum::object([("b", Datum::from(0))]);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Datum::Number(0.0));
        set.insert(Datum::Number(-0.0));
        set.insert(Datum::object([("x", Datum::from("y"))]));
        set.insert(Datum::object([("x", Datum::from("y"))]));
        assert_eq!(set.len(), 2);
    }
}
