//! # Snapshot Layout
//!
//! ```text
//! <snapshot>/
//! ├── source/<node>/node-identity.json
//! ├── source/<node>/persistence.db      (file backend)
//! ├── source/<node>/persistence/        (rocksdb backend)
//! ├── destination/<node>/...
//! └── tx-editor-plugins/cordapps.json
//! ```
//!
//! Source and destination nodes are paired by directory name.

use crate::container::StorageBackend;
use nc_04_node_database::{FileBackedKVStore, KVStoreError, KvNodeDatabase, NodeDatabase};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SOURCE_DIR: &str = "source";
pub const DESTINATION_DIR: &str = "destination";
/// File-backed node database.
pub const PERSISTENCE_FILE: &str = "persistence.db";
/// RocksDB node database directory.
pub const PERSISTENCE_DIR: &str = "persistence";

/// A source node and its destination counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePair {
    pub name: String,
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SnapshotLayout {
    root: PathBuf,
}

impl SnapshotLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    pub fn destination_dir(&self) -> PathBuf {
        self.root.join(DESTINATION_DIR)
    }

    /// Nodes present on both sides, ordered by name. Nodes found on one side
    /// only are logged and skipped.
    pub fn node_pairs(&self) -> io::Result<Vec<NodePair>> {
        let source = node_names(&self.source_dir())?;
        let destination = node_names(&self.destination_dir())?;

        for name in source.difference(&destination) {
            warn!("[cloner] Source node {} has no destination counterpart, skipping", name);
        }
        for name in destination.difference(&source) {
            warn!("[cloner] Destination node {} has no source counterpart, skipping", name);
        }

        Ok(source
            .intersection(&destination)
            .map(|name| NodePair {
                name: name.clone(),
                source_dir: self.source_dir().join(name),
                destination_dir: self.destination_dir().join(name),
            })
            .collect())
    }
}

/// Location of a node's database for `backend`.
pub fn database_path(node_dir: &Path, backend: StorageBackend) -> PathBuf {
    match backend {
        StorageBackend::File => node_dir.join(PERSISTENCE_FILE),
        StorageBackend::RocksDb => node_dir.join(PERSISTENCE_DIR),
    }
}

/// Open the node database under `node_dir`. A missing database opens empty.
pub fn open_node_database(
    node_dir: &Path,
    backend: StorageBackend,
) -> Result<Box<dyn NodeDatabase>, KVStoreError> {
    let path = database_path(node_dir, backend);
    debug!("[cloner] Opening {} database at {}", backend, path.display());
    match backend {
        StorageBackend::File => Ok(Box::new(KvNodeDatabase::new(FileBackedKVStore::open(
            &path,
        )?))),
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => Ok(Box::new(KvNodeDatabase::new(
            nc_04_node_database::RocksDbStore::open_default(&path)?,
        ))),
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => Err(KVStoreError::IOError {
            message: format!(
                "cannot open {}: rocksdb backend not compiled in",
                path.display()
            ),
        }),
    }
}

fn node_names(dir: &Path) -> io::Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
