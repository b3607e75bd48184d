//! # Shared Types Crate
//!
//! Ledger primitives used by every stage of a network clone.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identity and hash types are defined once here
//!   and re-used by the identity space, the codec, the editors and the database.
//! - **Immutable Values**: every type is a plain value; nothing here performs I/O.
//! - **Name-keyed Identity**: a [`Party`] is identified across networks by its
//!   [`LegalName`]; its [`PublicKey`] is network specific.

pub mod entities;
pub mod errors;
pub mod names;

pub use entities::*;
pub use errors::*;
pub use names::LegalName;
