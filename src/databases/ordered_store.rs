//! In-memory backend with native ordered range scans.
//!
//! Rows live in a `BTreeMap` keyed by primary key, so range restriction and
//! ordering come straight from the map and the default scan adaptor is never
//! involved.

use super::{poisoned, stamp_primary_key};
use crate::backend::error::BackendResult;
use crate::backend::stream::RowStream;
use crate::backend::traits::TableBackend;
use crate::datum::Datum;
use crate::interrupt::Interruptor;
use crate::range::{DatumRange, Sorting};
use log::trace;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Sorted table that implements `scan_stream` itself.
#[derive(Debug)]
pub struct OrderedBackend {
    primary_key: String,
    rows: RwLock<BTreeMap<Datum, Datum>>,
}

impl OrderedBackend {
    /// Create an empty table keyed by `primary_key`
    pub fn new<S: Into<String>>(primary_key: S) -> Self {
        Self {
            primary_key: primary_key.into(),
            rows: RwLock::new(BTreeMap::new()),
        }
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
}

impl TableBackend for OrderedBackend {
    fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    fn read_row(&self, pkey: &Datum, interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        interruptor.check()?;
        Ok(self.rows.read().map_err(poisoned)?.get(pkey).cloned())
    }

    fn write_row(
        &self,
        pkey: &Datum,
        _pkey_was_autogenerated: bool,
        new_value: Option<Datum>,
        interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        interruptor.check()?;
        match new_value {
            None => {
                self.rows.write().map_err(poisoned)?.remove(pkey);
                Ok(None)
            }
            Some(row) => {
                let stored = Datum::Object(stamp_primary_key(&self.primary_key, pkey, row)?);
                self.rows
                    .write()
                    .map_err(poisoned)?
                    .insert(pkey.clone(), stored.clone());
                Ok(Some(stored))
            }
        }
    }

    /// Snapshot the requested range under one read lock, then stream it.
    fn scan_stream(
        &self,
        range: &DatumRange,
        sorting: Sorting,
        interruptor: &Interruptor,
    ) -> BackendResult<RowStream> {
        interruptor.check()?;
        if range.is_empty() {
            return Ok(RowStream::empty(interruptor.clone()));
        }

        let mut selected: Vec<Datum> = {
            let rows = self.rows.read().map_err(poisoned)?;
            rows.range::<Datum, _>(range.bounds())
                .map(|(_, row)| row.clone())
                .collect()
        };
        if sorting == Sorting::Descending {
            selected.reverse();
        }

        trace!("OrderedBackend: range scan selected {} rows", selected.len());
        Ok(RowStream::from_rows(selected, interruptor.clone()))
    }
}
