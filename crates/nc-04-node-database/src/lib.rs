//! # Node Database (nc-04)
//!
//! Reads and writes the rows a migration touches: recorded transactions,
//! persistent parties and vault states, plus the node's current
//! network-parameters hash.
//!
//! ## Layout
//!
//! ```text
//! NodeDatabase (port)
//!   └── KvNodeDatabase<KV>
//!         └── KeyValueStore (port)
//!               ├── InMemoryKVStore     tests, dry runs
//!               ├── FileBackedKVStore   persistence.db
//!               └── RocksDbStore        persistence/   (feature "rocksdb")
//! ```
//!
//! ## Key Schema
//!
//! | Prefix | Key | Value |
//! |--------|-----|-------|
//! | `t:` | row sequence (u32 BE) | `TransactionRow` |
//! | `p:` | row sequence (u32 BE) | `PersistentParty` |
//! | `v:` | row sequence (u32 BE) | `VaultState` |
//! | `m:` | `network-parameters-hash` | `SecureHash` |
//!
//! Rows are read back in the order they were written. `write_core_data`
//! replaces every core row in a single atomic batch.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, KvNodeDatabase};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::{
    KVStoreError, KeyPrefix, MigrationData, PersistentParty, RelevancyStatus, StateStatus,
    StorageError, TransactionRow, TransactionStatus, VaultState,
};
pub use ports::{BatchOperation, KeyValueStore, NodeDatabase, ScanResult};
