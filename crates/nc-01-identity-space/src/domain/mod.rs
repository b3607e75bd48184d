//! # Domain Layer
//!
//! Pure identity-mapping logic. Repository access goes through
//! [`crate::ports::PartyRepository`].

pub mod entities;
pub mod errors;
pub mod identity_space;
pub mod keys;

pub use entities::*;
pub use errors::*;
pub use identity_space::IdentitySpace;
pub use keys::{KeyPair, PrivateKey};
