//! # Identity Space (nc-01)
//!
//! Builds the verified mapping from every source-network party to a freshly
//! re-keyed destination-network party.
//!
//! ## Construction
//!
//! ```text
//! PartyRepository (source) ─────┐
//!                               ├──→ match by LegalName ──→ fresh Ed25519 key pair
//! PartyRepository (destination)─┘                                │
//!                                                                ↓
//!                                                  IdentityMapping { source, destination + private key }
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One entry per name present on both sides | `IdentitySpace::new` |
//! | Names equal, keys differ | key generation loop in `IdentitySpace::new` |
//! | Lookups are total or fail with `MappingNotFound` | every `IdentitySpaceApi` method |
//! | Confidential keys resolve to their owner's entry | anonymous lookup tables |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): mapping entries, key generation, the identity space
//! - **Ports Layer** (`ports/`): `IdentitySpaceApi` (inbound), `PartyRepository` (outbound)
//! - **Adapters Layer** (`adapters/`): nodes-directory and in-memory repositories

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{
    InMemoryPartyRepository, NodeIdentityRecord, NodesDirPartyRepository, NODE_IDENTITY_FILE,
    NODE_KEY_FILE,
};
pub use domain::{
    IdentityError, IdentityMapping, IdentitySpace, KeyPair, LookupKind, NetworkSide,
    PartyAndPrivateKey, PrivateKey,
};
pub use ports::{ConfidentialIdentity, IdentitySpaceApi, PartyRepository, RepositoryError};
