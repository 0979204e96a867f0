//! Error types for table-level operations.
//!
//! Backends report failures as [`BackendError`]; the table view and the
//! registry wrap them in [`TableError`] together with the failures that only
//! make sense on the host side (unknown tables, unsupported operations).
//!
//! # Error Handling Example
//!
//! ```
//! use artable_store::backend::BackendError;
//! use artable_store::error::{TableError, TableResult};
//!
//! fn lookup() -> TableResult<()> {
//!     Err(BackendError::storage("Metadata store is unavailable.").into())
//! }
//!
//! match lookup() {
//!     Err(TableError::Backend(e)) if e.is_interrupted() => {
//!         // the client went away; nothing to report
//!     }
//!     Err(e) => eprintln!("query failed: {}", e),
//!     Ok(()) => {}
//! }
//! ```

use crate::backend::error::BackendError;
use thiserror::Error;

/// Result type alias for table-level operations.
pub type TableResult<T> = Result<T, TableError>;

/// Failure of a query against an artificial table.
///
/// Contract violations never show up here: the table view aborts on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A backend operation failed; its message is passed through verbatim
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// No backend is registered under this table name
    #[error("Table `{0}` does not exist.")]
    UnknownTable(String),

    /// A backend is already registered under this table name
    #[error("Table `{0}` is already registered.")]
    DuplicateTable(String),

    /// The operation is not available on artificial tables
    #[error("{0}")]
    Unsupported(String),
}

impl TableError {
    /// Returns true if the query stopped because its interruptor was raised
    ///
    /// Callers use this to suppress user-facing noise for expected
    /// cancellations such as a client disconnect.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, TableError::Backend(e) if e.is_interrupted())
    }
}
