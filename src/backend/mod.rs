//! Backend abstraction layer for artificial tables
//!
//! This module defines the trait that any artificial table backend must
//! implement, the error type backends report, and the lazy row stream that
//! scans return.

pub mod error;
pub mod stream;
pub mod traits;

pub use error::{BackendError, BackendResult};
pub use stream::{BoxedRowIterator, RowStream, default_scan_stream};
pub use traits::TableBackend;
