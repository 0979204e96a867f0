//! Backend error type that every artificial table backend reports through
//!
//! Backends describe their own failures with a human-readable message. The
//! table view surfaces these messages verbatim to the caller, so they should
//! read as complete sentences about the table, not about the backend's
//! internals.

use log::error;
use thiserror::Error;

/// Type alias for results of backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Failure of a single backend operation.
///
/// A missing row is never an error: point reads report absence as `Ok(None)`.
///
/// # Example
///
/// ```
/// use artable_store::backend::BackendError;
///
/// let error = BackendError::validation("`name` must be a string");
/// assert_eq!(error.to_string(), "`name` must be a string");
/// assert!(!error.is_interrupted());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend rejected a write, or a row failed a constraint.
    #[error("{0}")]
    Validation(String),

    /// The data the backend reads from is unavailable or inconsistent.
    #[error("{0}")]
    Storage(String),

    /// The interruptor was raised while the operation was running.
    #[error("The operation was interrupted.")]
    Interrupted,

    /// The backend is broken: it implements no scan strategy, or it flipped
    /// the existence of a row on write.
    ///
    /// This is a programming defect, never a runtime condition. The table
    /// view aborts when it sees one.
    #[error("Backend contract violation: {0}")]
    ContractViolation(String),
}

impl BackendError {
    /// Create a validation error from a message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        BackendError::Validation(message.into())
    }

    /// Create a storage error from a message
    pub fn storage<S: Into<String>>(message: S) -> Self {
        BackendError::Storage(message.into())
    }

    /// Create a contract violation from a message
    pub fn contract_violation<S: Into<String>>(message: S) -> Self {
        BackendError::ContractViolation(message.into())
    }

    /// Returns true if this error was caused by a raised interruptor
    pub fn is_interrupted(&self) -> bool {
        matches!(self, BackendError::Interrupted)
    }

    /// Returns true if this error signals a defective backend
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, BackendError::ContractViolation(_))
    }

    /// Returns true if the caller may retry the operation
    ///
    /// Nothing in this layer retries automatically, so every error is final
    /// from the contract's point of view.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Abort on a broken backend.
///
/// Continuing after a contract violation would silently corrupt query
/// semantics, so the violation is logged and turned into a panic.
#[track_caller]
pub(crate) fn abort_on_contract_violation(table: &str, message: &str) -> ! {
    error!("Table `{}`: backend contract violation: {}", table, message);
    panic!("backend for table `{table}` violated its contract: {message}");
}
