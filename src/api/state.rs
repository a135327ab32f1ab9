//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::config::{ConfigLoader, ConfigStore};

/// Shared application state.
///
/// Holds the current configuration snapshot. Handlers take a snapshot at the
/// start of a request and compute without holding the lock; a reload builds
/// a new store and swaps the pointer, so in-flight requests keep the
/// snapshot they started with.
#[derive(Clone)]
pub struct AppState {
    /// Directory configuration is (re)loaded from.
    config_dir: Arc<PathBuf>,
    /// The current configuration snapshot.
    store: Arc<RwLock<Arc<ConfigStore>>>,
}

impl AppState {
    /// Creates a new application state around an already loaded store.
    pub fn new(config_dir: impl Into<PathBuf>, store: ConfigStore) -> Self {
        Self {
            config_dir: Arc::new(config_dir.into()),
            store: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// Loads configuration from `config_dir` and creates the state.
    pub fn load(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let store = ConfigLoader::load(&config_dir);
        Self::new(config_dir, store)
    }

    /// The directory configuration is loaded from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the current configuration snapshot.
    pub fn snapshot(&self) -> Arc<ConfigStore> {
        let guard = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Reloads configuration from disk and swaps it in.
    ///
    /// Returns the new snapshot.
    pub fn reload(&self) -> Arc<ConfigStore> {
        let fresh = Arc::new(ConfigLoader::load(self.config_dir.as_path()));
        {
            let mut guard = self.store.write().unwrap_or_else(PoisonError::into_inner);
            *guard = Arc::clone(&fresh);
        }
        info!(
            path = %self.config_dir.display(),
            failed_tables = fresh.load_failures().len(),
            "Configuration snapshot swapped"
        );
        fresh
    }
}
