//! Registry of artificial table backends.
//!
//! The host builds one registry at startup, registers one backend per
//! artificial table name, and drops it at shutdown. There is no global
//! instance: whoever owns the registry decides who can see which tables.
//!
//! ```
//! use std::sync::Arc;
//! use artable_store::databases::MemoryBackend;
//! use artable_store::registry::BackendRegistry;
//!
//! let mut registry = BackendRegistry::new();
//! registry.register("server_config", Arc::new(MemoryBackend::new("id")))?;
//!
//! let table = registry.open("server_config")?;
//! assert_eq!(table.primary_key_name(), "id");
//! assert!(registry.open("missing").is_err());
//! # Ok::<(), artable_store::error::TableError>(())
//! ```

use crate::backend::error::abort_on_contract_violation;
use crate::backend::traits::TableBackend;
use crate::config::RegistryConfig;
use crate::error::{TableError, TableResult};
use crate::table::TableView;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Map from table name to the backend serving it.
pub struct BackendRegistry {
    config: RegistryConfig,
    backends: HashMap<String, Arc<dyn TableBackend>>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            backends: HashMap::new(),
        }
    }

    /// Register `backend` under the table name `name`.
    ///
    /// Fails with [`TableError::DuplicateTable`] if the name is taken and the
    /// configuration does not allow replacing.
    ///
    /// # Panics
    ///
    /// Panics if the backend reports an empty primary key name, which is a
    /// contract violation.
    pub fn register<S: Into<String>>(&mut self, name: S, backend: Arc<dyn TableBackend>) -> TableResult<()> {
        let name = name.into();
        if backend.primary_key_name().is_empty() {
            abort_on_contract_violation(&name, "primary key name is empty");
        }
        if self.backends.contains_key(&name) && !self.config.allow_replace {
            return Err(TableError::DuplicateTable(name));
        }

        debug!(
            "BackendRegistry: registered `{}` (primary key `{}`)",
            name,
            backend.primary_key_name()
        );
        self.backends.insert(name, backend);
        Ok(())
    }

    /// Remove the backend registered under `name`
    pub fn deregister(&mut self, name: &str) -> Option<Arc<dyn TableBackend>> {
        let removed = self.backends.remove(name);
        if removed.is_some() {
            debug!("BackendRegistry: deregistered `{}`", name);
        }
        removed
    }

    /// The backend registered under `name`
    pub fn get(&self, name: &str) -> TableResult<Arc<dyn TableBackend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| TableError::UnknownTable(name.to_string()))
    }

    /// Resolve `name` into a table view for one query
    pub fn open(&self, name: &str) -> TableResult<TableView> {
        Ok(TableView::new(name, self.get(name)?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Registered table names, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("config", &self.config)
            .field("tables", &self.table_names())
            .finish()
    }
}
