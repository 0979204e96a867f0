//! Configuration for table writes and the backend registry.
//!
//! Both configurations use the builder pattern via `typed-builder`, and both
//! have defaults matching the conservative behavior: writes refuse to
//! overwrite existing rows, and a table name can only be registered once.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

/// What an insert does when a row with the same primary key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConflictBehavior {
    /// Report a duplicate primary key error for that row
    #[default]
    Error,
    /// Overwrite the existing row with the new one
    Replace,
    /// Merge the new row's fields over the existing row
    Update,
}

/// Options for write operations on a table view.
///
/// # Examples
///
/// ```
/// use artable_store::config::{ConflictBehavior, WriteOptions};
///
/// // Defaults: fail on conflicts, don't collect changes
/// let options = WriteOptions::default();
/// assert_eq!(options.conflict, ConflictBehavior::Error);
///
/// let options = WriteOptions::builder()
///     .conflict(ConflictBehavior::Update)
///     .return_changes(true)
///     .build();
/// assert!(options.return_changes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct WriteOptions {
    /// How inserts treat an existing row with the same key
    #[builder(default)]
    pub conflict: ConflictBehavior,

    /// Record the old and new value of every row the write touched
    #[builder(default = false)]
    pub return_changes: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Configuration for a [`BackendRegistry`](crate::registry::BackendRegistry).
///
/// ```
/// use artable_store::config::RegistryConfig;
///
/// let config = RegistryConfig::builder().allow_replace(true).build();
/// assert!(config.allow_replace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct RegistryConfig {
    /// Let a registration replace a backend already registered under the
    /// same name instead of failing
    #[builder(default = false)]
    pub allow_replace: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
