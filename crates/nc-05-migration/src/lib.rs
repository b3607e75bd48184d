//! # Node Migration (nc-05)
//!
//! Moves one node's database from the source network to the destination
//! network.
//!
//! ## Flow
//!
//! ```text
//! source NodeDatabase ──read_core_data──→ MigrationData
//!     transactions:       decode → decompose → EditorChain → recompose → encode
//!     persistent parties: party → destination party (by name)
//!     vault states:       notary → destination notary (by name)
//!     state refs:         regenerated through StateRefAllocator
//! ──write_core_data (one batch)──→ destination NodeDatabase
//! ```
//!
//! ## Failure Model
//!
//! The first failing row aborts the node. Nothing is written unless every row
//! migrated. Errors carry the node name and the row position.
//!
//! ## Serializer Cache
//!
//! Building a serializer means resolving a snapshot's cordapps.
//! [`SerializerCache`] keeps one per [`CacheKey`] and is owned by the caller.

pub mod cache;
pub mod domain;
pub mod service;

pub use cache::{CacheKey, LoadedCordapps, SerializerCache, SnapshotId};
pub use domain::{MigrationError, MigrationReport, RowKind, StateRefAllocator};
pub use service::{MigrationOptions, NodeMigrationService};
