//! The artificial table backend contract
//!
//! There is one implementation per artificial table (a configuration table, a
//! status table, and so on). The table view only ever talks to a backend
//! through this trait, so it never needs to know how the rows are stored or
//! computed.

use super::error::{BackendError, BackendResult};
use super::stream::{RowStream, default_scan_stream};
use crate::datum::Datum;
use crate::interrupt::Interruptor;
use crate::range::{DatumRange, Sorting};

/// Interface every artificial table backend implements.
///
/// Notes:
///
/// 1. Absence of a row on [`read_row`] is `Ok(None)`, not an error.
/// 2. When [`write_row`] runs concurrently with a read, the read sees either
///    the old or the new row, never a mix; which one is unspecified.
/// 3. Every method may be called from any thread, so implementations
///    synchronize their own state.
///
/// # Scan strategies
///
/// Implement [`scan_vector`] *or* [`scan_stream`]. The default
/// `scan_stream` calls `scan_vector` and filters and sorts the snapshot
/// itself (see [`default_scan_stream`]); the default `scan_vector` fails with
/// [`BackendError::ContractViolation`]. A backend overriding `scan_stream`
/// is responsible for its own filtering and sorting. Overriding neither is a
/// defect that the table view treats as fatal on first use.
///
/// [`read_row`]: TableBackend::read_row
/// [`write_row`]: TableBackend::write_row
/// [`scan_vector`]: TableBackend::scan_vector
/// [`scan_stream`]: TableBackend::scan_stream
pub trait TableBackend: Send + Sync {
    /// Name of the primary-key field.
    ///
    /// Must not block, and must return the same non-empty name for the
    /// lifetime of the backend.
    fn primary_key_name(&self) -> &str;

    /// Current value of the row with primary key `pkey`, or `None` if there is
    /// no such row.
    fn read_row(&self, pkey: &Datum, interruptor: &Interruptor) -> BackendResult<Option<Datum>>;

    /// Write the row with primary key `pkey`.
    ///
    /// Writing a row that does not exist is an insertion; a `new_value` of
    /// `None` is a deletion. `pkey_was_autogenerated` is true only if `pkey`
    /// is a UUID generated for this insert because the caller gave no key.
    ///
    /// Returns the value that was actually stored. A backend may amend a
    /// `Some` value (for example by filling in omitted fields), but it must
    /// return `Some` for `Some` and `None` for `None`.
    fn write_row(
        &self,
        pkey: &Datum,
        pkey_was_autogenerated: bool,
        new_value: Option<Datum>,
        interruptor: &Interruptor,
    ) -> BackendResult<Option<Datum>>;

    /// Every row in the table, unfiltered and unsorted.
    fn scan_vector(&self, interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
        let _ = interruptor;
        Err(BackendError::contract_violation(format!(
            "backend with primary key `{}` implements neither scan_vector nor scan_stream",
            self.primary_key_name()
        )))
    }

    /// The rows whose primary key lies in `range`, ordered per `sorting`.
    fn scan_stream(
        &self,
        range: &DatumRange,
        sorting: Sorting,
        interruptor: &Interruptor,
    ) -> BackendResult<RowStream> {
        default_scan_stream(self, range, sorting, interruptor)
    }
}
