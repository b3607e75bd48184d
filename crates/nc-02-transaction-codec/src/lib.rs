//! # Transaction Codec (nc-02)
//!
//! Turns a recorded transaction blob into editable [`TransactionComponents`]
//! and back again.
//!
//! ## Pipeline
//!
//! ```text
//! db blob ──deserialize_db_blob──→ SignedTransaction ──decompose──→ TransactionComponents
//!    ↑                                                                      │
//!    └──serialize_db_blob── SignedTransaction ←──recompose── (edited) ─────┘
//! ```
//!
//! ## Wire Format
//!
//! A db blob is `DbBlob { magic: "NCTX", schema_version, transaction }`
//! encoded with bincode. The transaction is a list of component groups, each
//! component encoded individually, followed by the privacy salt and the
//! signatures. Output state payloads are application specific: they are
//! decoded through the [`SchemaRegistry`] supplied by the loaded cordapps.
//!
//! ## Fidelity
//!
//! Decoding rejects any blob whose bytes differ from their canonical
//! re-encoding, so decompose → recompose → encode with no edits is
//! byte-identical.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::BincodeTransactionSerializer;
pub use domain::{
    AttachmentConstraint, CodecError, Command, CommandData, ComponentGroup, ComponentGroupKind,
    ContractState, DbBlob, OpaqueState, SchemaRegistry, SignedTransaction, StateSchema,
    TimeWindow, TransactionComponents, TransactionSignature, TransactionState, WireTransaction,
    DB_BLOB_MAGIC, WIRE_SCHEMA_VERSION,
};
pub use ports::Serializer;
