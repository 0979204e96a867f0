//! The document value model shared by primary keys and rows.
//!
//! A [`Datum`] is a JSON-shaped value: null, boolean, number, string, array
//! or object. Every datum is totally ordered (see [`compare`]) so any datum
//! can serve as a primary key, and rows are simply object datums that carry
//! the primary key as one of their fields.
//!
//! # Example
//!
//! ```
//! use artable_store::datum::Datum;
//!
//! let row = Datum::object([("id", Datum::from("a")), ("value", Datum::from(1))]);
//! assert_eq!(row.get_field("id"), Some(&Datum::from("a")));
//! assert_eq!(row.primary_key("id").unwrap(), &Datum::from("a"));
//! ```

pub mod compare;
mod json;

use crate::backend::error::{BackendError, BackendResult};
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Map type used for object datums. Field names are kept sorted.
pub type DatumObject = BTreeMap<String, Datum>;

/// A structured, comparable document value.
///
/// Equality, ordering and hashing are implemented in [`compare`] and agree
/// with each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum Datum {
    #[default]
    Null,
    #[from]
    Bool(bool),
    /// Never NaN; build one from an `f64` with [`Datum::number`] or
    /// `Datum::try_from`, which reject it
    Number(f64),
    #[from]
    String(String),
    #[from]
    Array(Vec<Datum>),
    #[from]
    Object(DatumObject),
}

/// The type of a datum.
///
/// Variants are declared in the order used to compare datums of different
/// types, which is the alphabetical order of their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DatumType {
    Array,
    Bool,
    Null,
    Number,
    Object,
    String,
}

impl Datum {
    /// Build an object datum from field/value pairs
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Datum)>,
        K: Into<String>,
    {
        Datum::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a number datum, rejecting NaN
    pub fn number(value: f64) -> BackendResult<Self> {
        if value.is_nan() {
            return Err(BackendError::validation("NaN is not a valid number"));
        }
        Ok(Datum::Number(value))
    }

    /// The type of this datum
    pub fn type_of(&self) -> DatumType {
        match self {
            Datum::Null => DatumType::Null,
            Datum::Bool(_) => DatumType::Bool,
            Datum::Number(_) => DatumType::Number,
            Datum::String(_) => DatumType::String,
            Datum::Array(_) => DatumType::Array,
            Datum::Object(_) => DatumType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Datum]> {
        match self {
            Datum::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DatumObject> {
        match self {
            Datum::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of an object datum
    ///
    /// Returns `None` for missing fields and for datums that are not objects.
    pub fn get_field(&self, name: &str) -> Option<&Datum> {
        self.as_object().and_then(|fields| fields.get(name))
    }

    /// Set a field of an object datum, returning the previous value
    pub fn set_field<S: Into<String>>(&mut self, name: S, value: Datum) -> BackendResult<Option<Datum>> {
        match self {
            Datum::Object(fields) => Ok(fields.insert(name.into(), value)),
            other => Err(BackendError::validation(format!(
                "Expected type OBJECT but found {}.",
                other.type_of()
            ))),
        }
    }

    /// Extract the primary key of a row
    ///
    /// Fails with a validation error when the row is not an object or has no
    /// field called `pkey_name`.
    pub fn primary_key(&self, pkey_name: &str) -> BackendResult<&Datum> {
        let fields = self.as_object().ok_or_else(|| {
            BackendError::validation(format!("Expected type OBJECT but found {}.", self.type_of()))
        })?;
        fields.get(pkey_name).ok_or_else(|| {
            BackendError::validation(format!("Row is missing its primary key `{pkey_name}`: {self}"))
        })
    }

    /// Merge `patch` over this datum.
    ///
    /// Objects merge field by field, recursing into nested objects. Any other
    /// combination yields `patch`.
    pub fn merge(&self, patch: &Datum) -> Datum {
        match (self, patch) {
            (Datum::Object(base), Datum::Object(changes)) => {
                let mut merged = base.clone();
                for (name, value) in changes {
                    let next = match merged.get(name) {
                        Some(existing) => existing.merge(value),
                        None => value.clone(),
                    };
                    merged.insert(name.clone(), next);
                }
                Datum::Object(merged)
            }
            _ => patch.clone(),
        }
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::String(value.to_string())
    }
}

impl TryFrom<f64> for Datum {
    type Error = BackendError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Datum::number(value)
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Number(value as f64)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Datum::Number(f64::from(value))
    }
}

impl From<u32> for Datum {
    fn from(value: u32) -> Self {
        Datum::Number(f64::from(value))
    }
}

impl fmt::Display for Datum {
    /// Compact, JSON-like rendering used in error messages.
    ///
    /// Strings and field names are JSON-escaped. Numbers use Rust's shortest
    /// float formatting, so integral values print without a fraction (`1`,
    /// not `1.0` as `serde_json` writes them) and infinities print as `inf`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("null"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Number(n) => write!(f, "{n}"),
            Datum::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Datum::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Datum::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    let quoted = serde_json::to_string(name).map_err(|_| fmt::Error)?;
                    write!(f, "{quoted}:{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
