//! In-memory backend that only supports full-table snapshots.
//!
//! Scans go through the default scan adaptor, which makes this backend the
//! simplest complete implementation of the contract. It can also amend rows
//! on write (filling in default fields) and refuse generated keys, which is
//! what most configuration-style tables need.

use super::{poisoned, stamp_primary_key};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::traits::TableBackend;
use crate::datum::{Datum, DatumObject};
use crate::interrupt::Interruptor;
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::RwLock;

/// Hash-map backed table.
///
/// # Example
///
/// ```
/// use artable_store::backend::TableBackend;
/// use artable_store::databases::MemoryBackend;
/// use artable_store::datum::Datum;
/// use artable_store::interrupt::Interruptor;
///
/// let backend = MemoryBackend::new("id");
/// let interruptor = Interruptor::new();
/// let row = Datum::object([("id", Datum::from("a")), ("value", Datum::from(1))]);
///
/// backend.write_row(&Datum::from("a"), false, Some(row.clone()), &interruptor)?;
/// assert_eq!(backend.read_row(&Datum::from("a"), &interruptor)?, Some(row));
/// # Ok::<(), artable_store::backend::BackendError>(())
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    primary_key: String,
    rows: RwLock<HashMap<Datum, Datum>>,
    defaults: DatumObject,
    accept_generated_keys: bool,
}

impl MemoryBackend {
    /// Create an empty table keyed by `primary_key`
    pub fn new<S: Into<String>>(primary_key: S) -> Self {
        let primary_key = primary_key.into();
        debug!("MemoryBackend: created table keyed by `{}`", primary_key);
        Self {
            primary_key,
            rows: RwLock::new(HashMap::new()),
            defaults: DatumObject::new(),
            accept_generated_keys: true,
        }
    }

    /// Fill these fields into every written row that omits them
    pub fn with_defaults(mut self, defaults: DatumObject) -> Self {
        self.defaults = defaults;
        self
    }

    /// Refuse inserts whose primary key was generated by the caller
    pub fn rejecting_generated_keys(mut self) -> Self {
        self.accept_generated_keys = false;
        self
    }

    /// Seed the table with rows, keyed by their primary key field
    pub fn with_rows<I>(self, rows: I) -> BackendResult<Self>
    where
        I: IntoIterator<Item = Datum>,
    {
        {
            let mut stored = self.rows.write().map_err(poisoned)?;
            for row in rows {
                let pkey = row.primary_key(&self.primary_key)?.clone();
                stored.insert(pkey, row);
            }
        }
        Ok(self)
    }

    /// Number of rows currently stored
    pub fn len(&self) -> BackendResult<usize> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> BackendResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl TableBackend for MemoryBackend {
    fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    fn read_row(&self, pkey: &Datum, interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        interruptor.check()?;
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.get(pkey).cloned())
    }

    fn write_row(
        &self,
        pkey: &Datum,
        pkey_was_autogenerated: bool,
        new_value: Option<Datum>,
        interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        interruptor.check()?;
        let Some(row) = new_value else {
            let removed = self.rows.write().map_err(poisoned)?.remove(pkey);
            trace!("MemoryBackend: delete {} (existed: {})", pkey, removed.is_some());
            return Ok(None);
        };

        if pkey_was_autogenerated && !self.accept_generated_keys {
            return Err(BackendError::validation(format!(
                "This table does not accept generated primary keys; specify `{}` explicitly.",
                self.primary_key
            )));
        }

        let mut fields = stamp_primary_key(&self.primary_key, pkey, row)?;
        for (name, value) in &self.defaults {
            fields.entry(name.clone()).or_insert_with(|| value.clone());
        }
        let stored = Datum::Object(fields);

        self.rows
            .write()
            .map_err(poisoned)?
            .insert(pkey.clone(), stored.clone());
        trace!("MemoryBackend: wrote {}", pkey);
        Ok(Some(stored))
    }

    fn scan_vector(&self, interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
        interruptor.check()?;
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.values().cloned().collect())
    }
}
