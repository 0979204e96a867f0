//! Reference backends.
//!
//! Production backends (configuration tables, status tables) live with the
//! subsystems whose data they expose. The in-memory backends here cover the
//! two scan strategies of the contract and back the crate's own tests:
//!
//! - [`MemoryBackend`] only produces full snapshots and relies on the
//!   default scan adaptor.
//! - [`OrderedBackend`] keeps its rows sorted and scans ranges natively.

pub mod memory_store;
pub mod ordered_store;

pub use memory_store::MemoryBackend;
pub use ordered_store::OrderedBackend;

use crate::backend::error::{BackendError, BackendResult};
use crate::datum::{Datum, DatumObject};

/// Check a row about to be stored under `pkey` and fill in its primary key
/// field if it was omitted.
pub(crate) fn stamp_primary_key(pkey_name: &str, pkey: &Datum, row: Datum) -> BackendResult<DatumObject> {
    let mut fields = match row {
        Datum::Object(fields) => fields,
        other => {
            return Err(BackendError::validation(format!(
                "Expected type OBJECT but found {}.",
                other.type_of()
            )));
        }
    };
    match fields.get(pkey_name) {
        Some(existing) if existing != pkey => {
            return Err(BackendError::validation(format!(
                "Primary key `{pkey_name}` of the row ({existing}) does not match the key being written ({pkey})."
            )));
        }
        Some(_) => {}
        None => {
            fields.insert(pkey_name.to_string(), pkey.clone());
        }
    }
    Ok(fields)
}

fn poisoned<T>(_: T) -> BackendError {
    BackendError::storage("Table storage lock is poisoned.")
}
