//! Host-side view of a single artificial table.
//!
//! A [`TableView`] is what the query layer holds for the duration of one
//! query: it resolves point and range reads into backend calls and turns
//! inserts, replacements and deletions into sequences of
//! [`TableBackend::write_row`] calls.
//!
//! Backend messages are surfaced verbatim. Contract violations (a missing
//! scan strategy, a write that flips a row's existence) abort the process,
//! since continuing would silently corrupt query results.

use crate::backend::error::{BackendError, BackendResult, abort_on_contract_violation};
use crate::backend::stream::RowStream;
use crate::backend::traits::TableBackend;
use crate::config::{ConflictBehavior, WriteOptions};
use crate::datum::Datum;
use crate::error::{TableError, TableResult};
use crate::interrupt::Interruptor;
use crate::range::{DatumRange, Sorting};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Old and new value of one row touched by a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowChange {
    pub old_val: Option<Datum>,
    pub new_val: Option<Datum>,
}

/// Outcome of a batch write.
///
/// Per-row failures are counted in `errors` and do not stop the batch; only
/// the first message is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub inserted: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub errors: usize,
    pub first_error: Option<String>,
    /// Keys generated for inserted rows that had no primary key
    pub generated_keys: Vec<Datum>,
    /// Filled only when [`WriteOptions::return_changes`] is set
    pub changes: Vec<RowChange>,
}

impl WriteSummary {
    fn record_error<S: Into<String>>(&mut self, message: S) {
        self.errors += 1;
        if self.first_error.is_none() {
            self.first_error = Some(message.into());
        }
    }

    /// Number of rows whose stored value actually changed
    pub fn written(&self) -> usize {
        self.inserted + self.replaced + self.deleted
    }
}

/// A resolved artificial table.
#[derive(Clone)]
pub struct TableView {
    name: String,
    backend: Arc<dyn TableBackend>,
}

impl TableView {
    pub fn new<S: Into<String>>(name: S, backend: Arc<dyn TableBackend>) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_key_name(&self) -> &str {
        self.backend.primary_key_name()
    }

    pub fn backend(&self) -> &Arc<dyn TableBackend> {
        &self.backend
    }

    /// Read one row by primary key. A missing row is `Ok(None)`.
    pub fn read_row(&self, pkey: &Datum, interruptor: &Interruptor) -> TableResult<Option<Datum>> {
        let start = Instant::now();
        let row = self.escalate(self.backend.read_row(pkey, interruptor))?;
        debug!(
            "TableView `{}`: read_row {} (found: {}) in {:?}",
            self.name,
            pkey,
            row.is_some(),
            start.elapsed()
        );
        Ok(row)
    }

    /// Scan the rows whose primary key lies in `range`, ordered per `sorting`.
    pub fn read_all(
        &self,
        range: &DatumRange,
        sorting: Sorting,
        interruptor: &Interruptor,
    ) -> TableResult<RowStream> {
        let start = Instant::now();
        let stream = self.escalate(self.backend.scan_stream(range, sorting, interruptor))?;
        debug!(
            "TableView `{}`: opened {} scan in {:?}",
            self.name,
            sorting,
            start.elapsed()
        );
        Ok(stream)
    }

    /// Subscribe to changes on the table.
    ///
    /// Artificial tables have no change feeds; this always fails.
    pub fn read_changes(&self) -> TableResult<RowStream> {
        Err(TableError::Unsupported(format!(
            "Changefeeds are not supported on artificial table `{}`.",
            self.name
        )))
    }

    /// Insert rows.
    ///
    /// A row without a primary key gets a freshly generated UUID string,
    /// reported in [`WriteSummary::generated_keys`] and passed to the backend
    /// as autogenerated. A row whose key already exists is handled per
    /// [`WriteOptions::conflict`].
    pub fn insert<I>(&self, rows: I, options: &WriteOptions, interruptor: &Interruptor) -> TableResult<WriteSummary>
    where
        I: IntoIterator<Item = Datum>,
    {
        let start = Instant::now();
        let pkey_name = self.primary_key_name();
        let mut summary = WriteSummary::default();

        for mut row in rows {
            interruptor.check()?;

            let (pkey, autogenerated) = match row.get_field(pkey_name).cloned() {
                Some(pkey) => (pkey, false),
                None => {
                    let pkey = Datum::String(Uuid::new_v4().to_string());
                    if self.absorb(row.set_field(pkey_name, pkey.clone()), &mut summary)?.is_none() {
                        continue;
                    }
                    summary.generated_keys.push(pkey.clone());
                    (pkey, true)
                }
            };

            let Some(old) = self.absorb(self.backend.read_row(&pkey, interruptor), &mut summary)? else {
                continue;
            };
            let new = match (&old, options.conflict) {
                (None, _) | (Some(_), ConflictBehavior::Replace) => row,
                (Some(existing), ConflictBehavior::Update) => existing.merge(&row),
                (Some(existing), ConflictBehavior::Error) => {
                    summary.record_error(format!(
                        "Duplicate primary key `{pkey_name}`:\n{existing}\n{row}"
                    ));
                    continue;
                }
            };
            self.commit_row(&pkey, autogenerated, old, Some(new), options, &mut summary, interruptor)?;
        }

        debug!(
            "TableView `{}`: insert finished in {:?}: {:?}",
            self.name,
            start.elapsed(),
            summary
        );
        Ok(summary)
    }

    /// Replace rows by key.
    ///
    /// For every key, `f` receives the current row (or `None`) and returns the
    /// new row, or `None` to delete it. The primary key of a row cannot be
    /// changed this way.
    pub fn replace<F>(
        &self,
        keys: &[Datum],
        options: &WriteOptions,
        interruptor: &Interruptor,
        mut f: F,
    ) -> TableResult<WriteSummary>
    where
        F: FnMut(Option<&Datum>) -> BackendResult<Option<Datum>>,
    {
        let start = Instant::now();
        let pkey_name = self.primary_key_name();
        let mut summary = WriteSummary::default();

        for pkey in keys {
            interruptor.check()?;

            let Some(old) = self.absorb(self.backend.read_row(pkey, interruptor), &mut summary)? else {
                continue;
            };
            let Some(new) = self.absorb(f(old.as_ref()), &mut summary)? else {
                continue;
            };
            if let Some(row) = &new {
                match row.get_field(pkey_name) {
                    Some(key) if key == pkey => {}
                    Some(key) => {
                        summary.record_error(format!(
                            "Primary key `{pkey_name}` cannot be changed (from {pkey} to {key})."
                        ));
                        continue;
                    }
                    None => {
                        summary.record_error(format!(
                            "Row is missing its primary key `{pkey_name}`: {row}"
                        ));
                        continue;
                    }
                }
            }
            self.commit_row(pkey, false, old, new, options, &mut summary, interruptor)?;
        }

        debug!(
            "TableView `{}`: replace finished in {:?}: {:?}",
            self.name,
            start.elapsed(),
            summary
        );
        Ok(summary)
    }

    /// Merge `patch` over every existing row in `keys`; missing rows are skipped
    pub fn update(
        &self,
        keys: &[Datum],
        patch: &Datum,
        options: &WriteOptions,
        interruptor: &Interruptor,
    ) -> TableResult<WriteSummary> {
        self.replace(keys, options, interruptor, |old| Ok(old.map(|row| row.merge(patch))))
    }

    /// Delete rows by key; missing rows are skipped
    pub fn delete(&self, keys: &[Datum], options: &WriteOptions, interruptor: &Interruptor) -> TableResult<WriteSummary> {
        self.replace(keys, options, interruptor, |_| Ok(None))
    }

    /// Write one row and account for it in `summary`
    #[allow(clippy::too_many_arguments)]
    fn commit_row(
        &self,
        pkey: &Datum,
        autogenerated: bool,
        old: Option<Datum>,
        new: Option<Datum>,
        options: &WriteOptions,
        summary: &mut WriteSummary,
        interruptor: &Interruptor,
    ) -> TableResult<()> {
        if old == new {
            if new.is_none() {
                summary.skipped += 1;
            } else {
                summary.unchanged += 1;
            }
            return Ok(());
        }

        let deleting = new.is_none();
        let write = self.backend.write_row(pkey, autogenerated, new, interruptor);
        let Some(stored) = self.absorb(write, summary)? else {
            return Ok(());
        };
        if stored.is_none() != deleting {
            let requested = if deleting { "a deletion" } else { "an upsert" };
            let outcome = if stored.is_none() { "no row" } else { "a row" };
            abort_on_contract_violation(
                &self.name,
                &format!("write_row({pkey}) turned {requested} into {outcome}"),
            );
        }

        match (&old, &stored) {
            (None, Some(_)) => summary.inserted += 1,
            (Some(before), Some(after)) if before == after => summary.unchanged += 1,
            (Some(_), Some(_)) => summary.replaced += 1,
            (Some(_), None) => summary.deleted += 1,
            (None, None) => summary.skipped += 1,
        }
        if options.return_changes {
            summary.changes.push(RowChange {
                old_val: old,
                new_val: stored,
            });
        }
        Ok(())
    }

    /// Convert a backend result, aborting on contract violations
    fn escalate<T>(&self, result: BackendResult<T>) -> TableResult<T> {
        match result {
            Err(BackendError::ContractViolation(message)) => abort_on_contract_violation(&self.name, &message),
            other => other.map_err(TableError::from),
        }
    }

    /// Like [`escalate`](Self::escalate), but records ordinary failures in
    /// `summary` and returns `Ok(None)` so the batch can continue.
    /// Interruption still stops the batch.
    fn absorb<T>(&self, result: BackendResult<T>, summary: &mut WriteSummary) -> TableResult<Option<T>> {
        match self.escalate(result) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_interrupted() => Err(e),
            Err(e) => {
                summary.record_error(e.to_string());
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("name", &self.name)
            .field("primary_key", &self.primary_key_name())
            .finish()
    }
}
