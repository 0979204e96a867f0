//! Lazy row sequences and the default scan adaptor
//!
//! [`RowStream`] is what every scan hands back to the table view: a
//! single-pass iterator of rows that checks its interruptor before each row.
//! [`default_scan_stream`] builds one from a backend that can only produce a
//! full, unsorted snapshot of its table.

use super::error::{BackendError, BackendResult};
use super::traits::TableBackend;
use crate::datum::Datum;
use crate::interrupt::Interruptor;
use crate::range::{DatumRange, Sorting};
use log::{debug, trace};
use std::fmt;
use std::iter::FusedIterator;
use std::time::Instant;

/// Type alias for the fallible row iterators wrapped by [`RowStream`]
pub type BoxedRowIterator = Box<dyn Iterator<Item = BackendResult<Datum>> + Send>;

/// A lazy, single-pass, non-restartable sequence of rows.
///
/// The interruptor is checked before every row. Once the stream yields an
/// error, interruption included, it is exhausted and yields nothing more.
///
/// # Example
///
/// ```
/// use artable_store::backend::{BackendError, RowStream};
/// use artable_store::datum::Datum;
/// use artable_store::interrupt::Interruptor;
///
/// let interruptor = Interruptor::new();
/// let mut rows = RowStream::from_rows(vec![Datum::from(1), Datum::from(2)], interruptor.clone());
/// assert_eq!(rows.next(), Some(Ok(Datum::from(1))));
///
/// interruptor.interrupt();
/// assert_eq!(rows.next(), Some(Err(BackendError::Interrupted)));
/// assert_eq!(rows.next(), None);
/// ```
pub struct RowStream {
    rows: BoxedRowIterator,
    interruptor: Interruptor,
    emitted: usize,
    finished: bool,
    interrupted: bool,
}

impl RowStream {
    /// Wrap a fallible iterator of rows
    pub fn new(rows: BoxedRowIterator, interruptor: Interruptor) -> Self {
        Self {
            rows,
            interruptor,
            emitted: 0,
            finished: false,
            interrupted: false,
        }
    }

    /// Stream an already materialized vector of rows, in order
    pub fn from_rows(rows: Vec<Datum>, interruptor: Interruptor) -> Self {
        Self::new(Box::new(rows.into_iter().map(Ok)), interruptor)
    }

    /// Stream rows produced lazily by an infallible iterator
    pub fn from_lazy<I>(rows: I, interruptor: Interruptor) -> Self
    where
        I: Iterator<Item = Datum> + Send + 'static,
    {
        Self::new(Box::new(rows.map(Ok)), interruptor)
    }

    /// A stream with no rows
    pub fn empty(interruptor: Interruptor) -> Self {
        Self::from_rows(Vec::new(), interruptor)
    }

    /// Number of rows handed out so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Returns true if the stream stopped because its interruptor was raised
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Drain the remaining rows, stopping at the first error
    pub fn collect_rows(self) -> BackendResult<Vec<Datum>> {
        self.collect()
    }
}

impl Iterator for RowStream {
    type Item = BackendResult<Datum>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.interruptor.is_interrupted() {
            self.finished = true;
            self.interrupted = true;
            debug!("RowStream: interrupted after {} rows", self.emitted);
            return Some(Err(BackendError::Interrupted));
        }
        match self.rows.next() {
            Some(Ok(row)) => {
                self.emitted += 1;
                Some(Ok(row))
            }
            Some(Err(e)) => {
                self.finished = true;
                self.interrupted = e.is_interrupted();
                Some(Err(e))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl FusedIterator for RowStream {}

impl fmt::Debug for RowStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStream")
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .field("interrupted", &self.interrupted)
            .finish_non_exhaustive()
    }
}

/// Derive a filtered, sorted scan from a backend's full-table snapshot.
///
/// 1. Read the snapshot with [`TableBackend::scan_vector`]; failures and
///    interruption propagate unchanged.
/// 2. Keep the rows whose primary key lies in `range`. A row without a
///    primary key fails the whole scan.
/// 3. Stable-sort the survivors by primary key per `sorting`;
///    [`Sorting::Unordered`] keeps snapshot order.
/// 4. Hand them out through a [`RowStream`] that checks `interruptor`
///    before every row.
///
/// This always costs a full snapshot plus an `O(n log n)` sort. Backends with
/// ordered storage should override [`TableBackend::scan_stream`] instead.
pub fn default_scan_stream<B>(
    backend: &B,
    range: &DatumRange,
    sorting: Sorting,
    interruptor: &Interruptor,
) -> BackendResult<RowStream>
where
    B: TableBackend + ?Sized,
{
    let start = Instant::now();
    let snapshot = backend.scan_vector(interruptor)?;
    let total = snapshot.len();
    let pkey_name = backend.primary_key_name();

    let mut keyed = Vec::with_capacity(if range.is_universe() { total } else { 0 });
    if !range.is_empty() {
        for row in snapshot {
            interruptor.check()?;
            let pkey = row.primary_key(pkey_name)?;
            if range.contains(pkey) {
                keyed.push((pkey.clone(), row));
            }
        }
    }

    if sorting.is_ordered() {
        keyed.sort_by(|(a, _), (b, _)| sorting.compare(a, b));
    }

    trace!(
        "default_scan_stream: kept {} of {} rows ({}) in {:?}",
        keyed.len(),
        total,
        sorting,
        start.elapsed()
    );
    Ok(RowStream::from_lazy(
        keyed.into_iter().map(|(_, row)| row),
        interruptor.clone(),
    ))
}
