//! Cooperative interruption of backend operations.
//!
//! Every potentially blocking backend call receives an [`Interruptor`]. The
//! host raises it when the query that owns the call goes away (client
//! disconnect, timeout, shutdown). Backends and the scan adaptor poll it at
//! bounded intervals and give up with [`BackendError::Interrupted`].
//!
//! ```
//! use artable_store::interrupt::Interruptor;
//!
//! let interruptor = Interruptor::new();
//! let handle = interruptor.clone();
//! assert!(interruptor.check().is_ok());
//!
//! handle.interrupt();
//! assert!(interruptor.is_interrupted());
//! assert!(interruptor.check().is_err());
//! ```

use crate::backend::error::{BackendError, BackendResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared, one-shot interrupt signal.
///
/// Clones observe the same signal. Once raised it stays raised.
#[derive(Debug, Clone, Default)]
pub struct Interruptor {
    raised: Arc<AtomicBool>,
}

impl Interruptor {
    /// Create a signal that has not been raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal for every clone of this interruptor
    pub fn interrupt(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Returns true once the signal has been raised
    pub fn is_interrupted(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Fail with [`BackendError::Interrupted`] if the signal has been raised
    #[inline]
    pub fn check(&self) -> BackendResult<()> {
        if self.is_interrupted() {
            Err(BackendError::Interrupted)
        } else {
            Ok(())
        }
    }
}
