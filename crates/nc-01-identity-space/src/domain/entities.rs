//! # Identity Entities
//!
//! Mapping entries produced once per migration run.

use super::keys::PrivateKey;
use serde::{Deserialize, Serialize};
use shared_types::Party;
use std::fmt;

/// Which network a party or repository belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkSide {
    Source,
    Destination,
}

impl fmt::Display for NetworkSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkSide::Source => write!(f, "source"),
            NetworkSide::Destination => write!(f, "destination"),
        }
    }
}

/// A destination party together with its freshly generated private key.
#[derive(Debug, Clone)]
pub struct PartyAndPrivateKey {
    pub party: Party,
    pub private_key: PrivateKey,
}

/// One row of the identity space.
///
/// `source_party.name == destination_party_and_private_key.party.name` and the
/// owning keys always differ.
#[derive(Debug, Clone)]
pub struct IdentityMapping {
    pub source_party: Party,
    pub destination_party_and_private_key: PartyAndPrivateKey,
}

impl IdentityMapping {
    /// Shorthand for the destination party.
    pub fn destination_party(&self) -> &Party {
        &self.destination_party_and_private_key.party
    }
}
