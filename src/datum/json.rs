//! Conversions between datums and `serde_json` values.

use super::{Datum, DatumObject};
use crate::backend::error::BackendError;
use serde_json::{Map, Number, Value};

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Datum::Null, Datum::Number),
            Value::String(s) => Datum::String(s),
            Value::Array(items) => Datum::Array(items.into_iter().map(Datum::from).collect()),
            Value::Object(fields) => Datum::Object(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Datum::from(value)))
                    .collect::<DatumObject>(),
            ),
        }
    }
}

impl TryFrom<&Datum> for Value {
    type Error = BackendError;

    /// Fails on infinite or NaN numbers, which JSON cannot express
    fn try_from(datum: &Datum) -> Result<Self, Self::Error> {
        Ok(match datum {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(*b),
            Datum::Number(n) => Number::from_f64(*n)
                .map(Value::Number)
                .ok_or_else(|| BackendError::validation(format!("Number {n} cannot be represented in JSON")))?,
            Datum::String(s) => Value::String(s.clone()),
            Datum::Array(items) => Value::Array(
                items.iter().map(Value::try_from).collect::<Result<Vec<_>, _>>()?,
            ),
            Datum::Object(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (name, value) in fields {
                    map.insert(name.clone(), Value::try_from(value)?);
                }
                Value::Object(map)
            }
        })
    }
}
