//! # Cloner Configuration
//!
//! Defaults, then `NC_*` environment overrides, then command-line flags.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `NC_SNAPSHOT_DIR` | `snapshot_dir` |
//! | `NC_STORAGE_BACKEND` | `storage_backend` (`file` or `rocksdb`) |
//! | `NC_TARGET_NETWORK_PARAMETERS_HASH` | `target_network_parameters_hash` (64 hex chars) |
//! | `NC_PARALLEL_NODES` | `parallel_nodes` |
//! | `NC_DRY_RUN` | `dry_run` |

use shared_types::SecureHash;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Plugin directory name inside a snapshot.
pub const DEFAULT_PLUGINS_DIR: &str = "tx-editor-plugins";

/// Node database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// `persistence.db` single-file store.
    #[default]
    File,
    /// `persistence/` RocksDB directory.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "rocksdb" => Ok(Self::RocksDb),
            _ => Err(ConfigError::InvalidValue {
                name: "storage backend",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::RocksDb => write!(f, "rocksdb"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("snapshot directory {} does not exist", .0.display())]
    MissingSnapshotDir(PathBuf),

    #[error("storage backend '{0}' is not compiled in (enable the 'rocksdb' feature)")]
    BackendUnavailable(StorageBackend),
}

/// Complete cloner configuration.
#[derive(Debug, Clone)]
pub struct ClonerConfig {
    pub snapshot_dir: PathBuf,
    /// Defaults to `<snapshot_dir>/tx-editor-plugins`.
    pub plugins_dir: Option<PathBuf>,
    pub storage_backend: StorageBackend,
    /// Use this hash instead of each destination node's own.
    pub target_network_parameters_hash: Option<SecureHash>,
    /// Migrate nodes concurrently.
    pub parallel_nodes: bool,
    pub dry_run: bool,
    /// Write the new identities into the destination node directories.
    pub export_identities: bool,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("./snapshot"),
            plugins_dir: None,
            storage_backend: StorageBackend::File,
            target_network_parameters_hash: None,
            parallel_nodes: false,
            dry_run: false,
            export_identities: false,
        }
    }
}

impl ClonerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `NC_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("NC_SNAPSHOT_DIR") {
            self.snapshot_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("NC_STORAGE_BACKEND") {
            self.storage_backend = backend.parse()?;
        }
        if let Some(hash) = lookup("NC_TARGET_NETWORK_PARAMETERS_HASH") {
            self.target_network_parameters_hash = Some(parse_hash(&hash)?);
        }
        if let Some(flag) = lookup("NC_PARALLEL_NODES") {
            self.parallel_nodes = parse_flag("NC_PARALLEL_NODES", &flag)?;
        }
        if let Some(flag) = lookup("NC_DRY_RUN") {
            self.dry_run = parse_flag("NC_DRY_RUN", &flag)?;
        }
        Ok(())
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.plugins_dir
            .clone()
            .unwrap_or_else(|| self.snapshot_dir.join(DEFAULT_PLUGINS_DIR))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.snapshot_dir.is_dir() {
            return Err(ConfigError::MissingSnapshotDir(self.snapshot_dir.clone()));
        }
        if self.storage_backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb));
        }
        Ok(())
    }
}

/// Parse a 32-byte hash from hex.
pub fn parse_hash(value: &str) -> Result<SecureHash, ConfigError> {
    SecureHash::from_hex(value.trim()).map_err(|_| ConfigError::InvalidValue {
        name: "network parameters hash",
        value: value.to_string(),
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
