//! # Artable Store
//!
//! The contract by which a query engine exposes backend-defined data
//! (cluster configuration, runtime status, other synthesized administrative
//! views) as ordinary tables that can be read, ranged, sorted and written,
//! without the query layer knowing how any backend stores or computes its
//! rows.
//!
//! ## Features
//!
//! - **One trait per table**: [`TableBackend`] with point reads, point writes
//!   and two interchangeable scan strategies
//! - **Default scan adaptor**: backends that can only produce a full snapshot
//!   get filtered, sorted, lazy range scans for free
//! - **Cooperative cancellation**: every blocking call takes an
//!   [`Interruptor`] and stops promptly when it is raised
//! - **Single polymorphic write**: inserts, replacements and deletions all go
//!   through `write_row`, with existence preserved as requested
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use artable_store::prelude::*;
//! use artable_store::databases::MemoryBackend;
//!
//! let mut registry = BackendRegistry::new();
//! registry.register("test", Arc::new(MemoryBackend::new("id")))?;
//!
//! let table = registry.open("test")?;
//! let interruptor = Interruptor::new();
//! let rows = ["a", "b", "c", "d", "e"]
//!     .map(|k| Datum::object([("id", Datum::from(k)), ("value", Datum::from(k))]));
//! table.insert(rows, &WriteOptions::default(), &interruptor)?;
//!
//! let range = DatumRange::between(Datum::from("b"), Datum::from("d"));
//! let keys: Vec<Datum> = table
//!     .read_all(&range, Sorting::Ascending, &interruptor)?
//!     .collect_rows()?
//!     .iter()
//!     .map(|row| row.get_field("id").cloned().unwrap_or_default())
//!     .collect();
//! assert_eq!(keys, vec![Datum::from("b"), Datum::from("c")]);
//! # Ok::<(), TableError>(())
//! ```
//!
//! ## Known limitations
//!
//! Artificial tables do not support change feeds;
//! [`TableView::read_changes`](table::TableView::read_changes) always fails
//! with [`TableError::Unsupported`](error::TableError::Unsupported).

pub mod backend;
pub mod config;
pub mod databases;
pub mod datum;
pub mod error;
pub mod interrupt;
pub mod prelude;
pub mod range;
pub mod registry;
pub mod table;

pub use backend::{BackendError, BackendResult, RowStream, TableBackend};
pub use datum::Datum;
pub use error::{TableError, TableResult};
pub use interrupt::Interruptor;
