//! # Cloner Runtime
//!
//! Library behind the `network-cloner` binary.
//!
//! ## Modules
//!
//! - `container/` - Configuration: defaults, `NC_*` environment overrides, validation
//! - `snapshot`   - Snapshot directory layout, node pairing, opening node databases
//! - `runner`     - Per-snapshot run over every node pair
//!
//! ## Run Sequence
//!
//! ```text
//! ClonerConfig ──validate──→ SnapshotLayout
//!     source/ + destination/ identities ──→ IdentitySpace
//!     tx-editor-plugins/cordapps.json   ──→ SerializerCache ──→ LoadedCordapps
//!     for each node pair (rayon when parallel_nodes):
//!         NodeMigrationService::migrate_node
//!     export_identities (optional)
//! ```

pub mod container;
pub mod runner;
pub mod snapshot;

pub use container::{ClonerConfig, ConfigError, StorageBackend};
pub use runner::{default_registry, CloneRunner, CloneSummary};
pub use snapshot::{
    database_path, open_node_database, NodePair, SnapshotLayout, PERSISTENCE_DIR, PERSISTENCE_FILE,
};
