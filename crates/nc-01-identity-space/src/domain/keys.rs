//! # Destination Key Material
//!
//! Ed25519 key pairs minted for destination identities. Keys are always drawn
//! from the OS-seeded thread RNG and never derived from source material.

use ed25519_dalek::SigningKey;
use shared_types::PublicKey;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ed25519 secret seed (32 bytes). Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wrap a raw seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(seed)
    }

    /// Public key matching this seed.
    pub fn public_key(&self) -> PublicKey {
        let signing_key = SigningKey::from_bytes(&self.0);
        PublicKey(signing_key.verifying_key().to_bytes())
    }

    /// Hex encoding of the seed, for writing destination keystores.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

/// Freshly generated Ed25519 key pair.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey(self.signing_key.to_bytes())
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}
