//! # Core Ledger Entities
//!
//! ## Clusters
//!
//! - **Hashing**: [`SecureHash`]
//! - **Keys & Identity**: [`PublicKey`], [`Party`], [`AnonymousParty`], [`AbstractParty`]
//! - **State Positions**: [`StateRef`]

use crate::errors::PrimitiveError;
use crate::names::LegalName;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

// =============================================================================
// CLUSTER A: HASHING
// =============================================================================

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct SecureHash(pub [u8; 32]);

impl SecureHash {
    /// The all-zero hash.
    pub const fn zero_hash() -> Self {
        Self([0u8; 32])
    }

    /// The all-ones hash (every bit set).
    pub const fn all_ones_hash() -> Self {
        Self([0xFF; 32])
    }

    /// SHA-256 of arbitrary bytes.
    pub fn sha256(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// SHA-256 of 32 random bytes. Used to mint identifiers that must never
    /// collide with anything recorded in a source snapshot.
    pub fn random_sha256() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::sha256(&seed)
    }

    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        decode_32(s).map(Self)
    }

    /// Lower-case hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureHash({}…)", hex::encode(&self.0[..6]))
    }
}

// =============================================================================
// CLUSTER B: KEYS & IDENTITY
// =============================================================================

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        decode_32(s).map(Self)
    }

    /// Lower-case hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}…)", hex::encode(&self.0[..6]))
    }
}

/// A well-known participant: legal name plus owning key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Party {
    /// X.500 legal name; stable across networks.
    pub name: LegalName,
    /// Network-specific owning key.
    pub owning_key: PublicKey,
}

impl Party {
    pub fn new(name: LegalName, owning_key: PublicKey) -> Self {
        Self { name, owning_key }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A confidential participant known only by a one-time key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnonymousParty {
    pub owning_key: PublicKey,
}

/// Either a well-known or a confidential participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbstractParty {
    Party(Party),
    Anonymous(AnonymousParty),
}

impl AbstractParty {
    /// The key this participant signs with.
    pub fn owning_key(&self) -> PublicKey {
        match self {
            AbstractParty::Party(party) => party.owning_key,
            AbstractParty::Anonymous(anonymous) => anonymous.owning_key,
        }
    }

    /// The legal name, if this participant is well known.
    pub fn name(&self) -> Option<&LegalName> {
        match self {
            AbstractParty::Party(party) => Some(&party.name),
            AbstractParty::Anonymous(_) => None,
        }
    }
}

impl From<Party> for AbstractParty {
    fn from(party: Party) -> Self {
        AbstractParty::Party(party)
    }
}

impl From<AnonymousParty> for AbstractParty {
    fn from(anonymous: AnonymousParty) -> Self {
        AbstractParty::Anonymous(anonymous)
    }
}

impl fmt::Display for AbstractParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractParty::Party(party) => write!(f, "{}", party),
            AbstractParty::Anonymous(anonymous) => write!(f, "Anonymous({})", anonymous.owning_key),
        }
    }
}

// =============================================================================
// CLUSTER C: STATE POSITIONS
// =============================================================================

/// Position of an output state: producing transaction id plus output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateRef {
    pub txhash: SecureHash,
    pub index: u32,
}

impl StateRef {
    pub fn new(txhash: SecureHash, index: u32) -> Self {
        Self { txhash, index }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.txhash, self.index)
    }
}

fn decode_32(s: &str) -> Result<[u8; 32], PrimitiveError> {
    let bytes = hex::decode(s.trim()).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| PrimitiveError::InvalidLength {
            expected: 32,
            actual,
        })
}
