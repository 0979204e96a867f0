//! Prelude module for convenient imports.
//!
//! This module re-exports the types needed to implement a backend or to
//! query one, allowing a single import.
//!
//! # Usage
//!
//! ```
//! use artable_store::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Backend Contract
//!
//! - [`TableBackend`]: Trait every artificial table backend implements
//! - [`RowStream`]: Lazy, interruptible row sequence returned by scans
//! - [`BackendError`] / [`BackendResult`]: Backend failure and result alias
//!
//! ## Values and Ranges
//!
//! - [`Datum`]: Document value used for rows and primary keys
//! - [`DatumRange`] and [`Sorting`]: Scan restriction and ordering
//! - [`Interruptor`]: Cooperative cancellation signal
//!
//! ## Hosting
//!
//! - [`BackendRegistry`]: Table name to backend map
//! - [`TableView`]: Per-query access to one table
//! - [`WriteOptions`], [`ConflictBehavior`], [`WriteSummary`]
//! - [`TableError`] / [`TableResult`]
//!
//! # Implementing a Backend
//!
//! ```
//! use artable_store::prelude::*;
//!
//! /// A read-only table listing the servers of a cluster.
//! struct ServerStatus {
//!     servers: Vec<String>,
//! }
//!
//! impl TableBackend for ServerStatus {
//!     fn primary_key_name(&self) -> &str {
//!         "name"
//!     }
//!
//!     fn read_row(&self, pkey: &Datum, interruptor: &Interruptor) -> BackendResult<Option<Datum>> {
//!         interruptor.check()?;
//!         Ok(self
//!             .servers
//!             .iter()
//!             .find(|name| pkey.as_str() == Some(name.as_str()))
//!             .map(|name| Datum::object([("name", Datum::from(name.as_str()))])))
//!     }
//!
//!     fn write_row(
//!         &self,
//!         _pkey: &Datum,
//!         _pkey_was_autogenerated: bool,
//!         _new_value: Option<Datum>,
//!         _interruptor: &Interruptor,
//!     ) -> BackendResult<Option<Datum>> {
//!         Err(BackendError::validation("It's illegal to write to the `server_status` table."))
//!     }
//!
//!     // Only a snapshot: the default scan adaptor filters and sorts it.
//!     fn scan_vector(&self, interruptor: &Interruptor) -> BackendResult<Vec<Datum>> {
//!         interruptor.check()?;
//!         Ok(self
//!             .servers
//!             .iter()
//!             .map(|name| Datum::object([("name", Datum::from(name.as_str()))]))
//!             .collect())
//!     }
//! }
//!
//! let backend = ServerStatus { servers: vec!["s2".into(), "s1".into()] };
//! let rows = backend
//!     .scan_stream(&DatumRange::universe(), Sorting::Ascending, &Interruptor::new())?
//!     .collect_rows()?;
//! assert_eq!(rows[0].get_field("name"), Some(&Datum::from("s1")));
//! # Ok::<(), BackendError>(())
//! ```

// Backend contract
pub use crate::backend::{BackendError, BackendResult, RowStream, TableBackend};

// Values, ranges and cancellation
pub use crate::datum::{Datum, DatumType};
pub use crate::interrupt::Interruptor;
pub use crate::range::{DatumRange, Sorting};

// Hosting
pub use crate::config::{ConflictBehavior, RegistryConfig, WriteOptions};
pub use crate::error::{TableError, TableResult};
pub use crate::registry::BackendRegistry;
pub use crate::table::{RowChange, TableView, WriteSummary};
