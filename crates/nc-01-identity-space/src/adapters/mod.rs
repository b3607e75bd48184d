//! # Adapters Layer
//!
//! `PartyRepository` implementations.

mod memory;
mod nodes_dir;

pub use memory::InMemoryPartyRepository;
pub use nodes_dir::{NodeIdentityRecord, NodesDirPartyRepository, NODE_IDENTITY_FILE, NODE_KEY_FILE};
