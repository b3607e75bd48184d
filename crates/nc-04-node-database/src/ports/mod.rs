//! # Ports Layer
//!
//! - **Inbound** (`inbound.rs`): `NodeDatabase`, used by the migration
//! - **Outbound** (`outbound.rs`): `KeyValueStore`, implemented by storage backends

pub mod inbound;
pub mod outbound;

pub use inbound::NodeDatabase;
pub use outbound::{BatchOperation, KeyValueStore, ScanResult};
