// Common test utilities and helpers
#![allow(dead_code)]

use artable_store::prelude::*;
use artable_store::databases::MemoryBackend;

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a row `{id: <id>, value: <value>}`
pub fn row<V: Into<Datum>>(id: &str, value: V) -> Datum {
    Datum::object([("id", Datum::from(id)), ("value", value.into())])
}

/// Primary keys of `rows`, in order
pub fn ids(rows: &[Datum]) -> Vec<Datum> {
    rows.iter()
        .map(|r| r.get_field("id").cloned().expect("row without id"))
        .collect()
}

/// String keys as datums
pub fn keys(ids: &[&str]) -> Vec<Datum> {
    ids.iter().map(|id| Datum::from(*id)).collect()
}

/// A memory backend holding `{id: k, value: k}` for every key
pub fn letters_backend(letters: &[&str]) -> MemoryBackend {
    MemoryBackend::new("id")
        .with_rows(letters.iter().map(|k| row(k, *k)))
        .expect("seed rows")
}

/// A backend that overrides neither scan strategy
pub struct NoScanBackend;

impl TableBackend for NoScanBackend {
    fn primary_key_name(&self) -> &str {
        "id"
    }

    fn read_row(&self, _pkey: &Datum, _interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        Ok(None)
    }

    fn write_row(
        &self,
        _pkey: &Datum,
        _pkey_was_autogenerated: bool,
        new_value: Option<Datum>,
        _interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        Ok(new_value)
    }
}

/// A backend whose `write_row` reports deletion for every upsert
pub struct VanishingWriteBackend;

impl TableBackend for VanishingWriteBackend {
    fn primary_key_name(&self) -> &str {
        "id"
    }

    fn read_row(&self, _pkey: &Datum, _interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        Ok(None)
    }

    fn write_row(
        &self,
        _pkey: &Datum,
        _pkey_was_autogenerated: bool,
        _new_value: Option<Datum>,
        _interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        Ok(None)
    }

    fn scan_vector(&self, _interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
        Ok(Vec::new())
    }
}

/// A backend that reports an empty primary key name
pub struct NamelessBackend;

impl TableBackend for NamelessBackend {
    fn primary_key_name(&self) -> &str {
        ""
    }

    fn read_row(&self, _pkey: &Datum, _interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        Ok(None)
    }

    fn write_row(
        &self,
        _pkey: &Datum,
        _pkey_was_autogenerated: bool,
        new_value: Option<Datum>,
        _interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        Ok(new_value)
    }

    fn scan_vector(&self, _interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
        Ok(Vec::new())
    }
}

/// A snapshot-only backend whose storage is down
pub struct UnavailableBackend;

impl TableBackend for UnavailableBackend {
    fn primary_key_name(&self) -> &str {
        "name"
    }

    fn read_row(&self, _pkey: &Datum, _interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
        Err(BackendError::storage("The cluster metadata is unavailable."))
    }

    fn write_row(
        &self,
        _pkey: &Datum,
        _pkey_was_autogenerated: bool,
        _new_value: Option<Datum>,
        _interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>> {
        Err(BackendError::storage("The cluster metadata is unavailable."))
    }

    fn scan_vector(&self, _interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
        Err(BackendError::storage("The cluster metadata is unavailable."))
    }
}
