//! # Serializer Cache
//!
//! Resolving a snapshot's cordapps and building its serializer is done once
//! per snapshot and plugin directory. Entries are keyed by [`CacheKey`];
//! two snapshots never share an entry even when their plugin directories
//! look alike, and pointing one snapshot at another plugin directory loads
//! afresh.

use crate::domain::MigrationError;
use nc_02_transaction_codec::{BincodeTransactionSerializer, Serializer};
use nc_03_tx_editors::{CordappRegistry, CordappsRepository, RegistryCordappsRepository, TxEditor};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Identity of a snapshot, normally its canonical directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Canonical path when it resolves, the path as given otherwise.
    pub fn from_path(path: &Path) -> Self {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self(resolved.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot together with the plugin directory its cordapps came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    snapshot: SnapshotId,
    plugins_dir: PathBuf,
}

impl CacheKey {
    /// `plugins_dir` is canonicalized when it resolves.
    pub fn new(snapshot: SnapshotId, plugins_dir: &Path) -> Self {
        Self {
            snapshot,
            plugins_dir: plugins_dir
                .canonicalize()
                .unwrap_or_else(|_| plugins_dir.to_path_buf()),
        }
    }

    pub fn snapshot(&self) -> &SnapshotId {
        &self.snapshot
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.snapshot, self.plugins_dir.display())
    }
}

/// Serializer and editors resolved from one snapshot's cordapps.
#[derive(Clone)]
pub struct LoadedCordapps {
    pub serializer: Arc<dyn Serializer>,
    pub tx_editors: Vec<Arc<dyn TxEditor>>,
}

impl LoadedCordapps {
    pub fn from_repository(repository: &dyn CordappsRepository) -> Self {
        Self {
            serializer: Arc::new(BincodeTransactionSerializer::new(repository.schemas())),
            tx_editors: repository.tx_editors(),
        }
    }

    pub fn editor_names(&self) -> Vec<&str> {
        self.tx_editors.iter().map(|e| e.name()).collect()
    }
}

impl fmt::Debug for LoadedCordapps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedCordapps")
            .field("tx_editors", &self.editor_names())
            .finish()
    }
}

/// Explicit, caller-owned cache of [`LoadedCordapps`] per snapshot and
/// plugin directory.
#[derive(Default)]
pub struct SerializerCache {
    entries: Mutex<HashMap<CacheKey, Arc<LoadedCordapps>>>,
}

impl SerializerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry for `key`, or the result of `load` which is then cached.
    pub fn get_or_load<F>(&self, key: &CacheKey, load: F) -> Result<Arc<LoadedCordapps>, MigrationError>
    where
        F: FnOnce() -> Result<LoadedCordapps, MigrationError>,
    {
        if let Some(hit) = self.entries.lock().get(key) {
            debug!("[nc-05] Serializer cache hit for {}", key);
            return Ok(hit.clone());
        }

        let loaded = Arc::new(load()?);
        let mut entries = self.entries.lock();
        let entry = entries.entry(key.clone()).or_insert(loaded);
        Ok(entry.clone())
    }

    /// Resolve `plugins_dir` against `registry` for snapshot `id`.
    pub fn load_plugins(
        &self,
        id: &SnapshotId,
        plugins_dir: &Path,
        registry: &CordappRegistry,
    ) -> Result<Arc<LoadedCordapps>, MigrationError> {
        self.get_or_load(&CacheKey::new(id.clone(), plugins_dir), || {
            let repository = RegistryCordappsRepository::load(plugins_dir, registry)?;
            Ok(LoadedCordapps::from_repository(&repository))
        })
    }

    /// Drop every entry for one snapshot. Returns whether any was cached.
    pub fn invalidate(&self, id: &SnapshotId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| key.snapshot() != id);
        entries.len() != before
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl fmt::Debug for SerializerCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock();
        f.debug_set().entries(entries.keys()).finish()
    }
}
