/// Key prefixes for the node database key schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `t:{seq}` -> TransactionRow
    Transaction,
    /// `p:{seq}` -> PersistentParty
    PersistentParty,
    /// `v:{seq}` -> VaultState
    VaultState,
    /// `m:{name}` -> metadata value
    Metadata,
}

/// Metadata key holding the node's network-parameters hash.
pub const NETWORK_PARAMETERS_HASH_KEY: &[u8] = b"network-parameters-hash";

impl KeyPrefix {
    /// Prefixes of the rows replaced by a core data write.
    pub const CORE_ROWS: [KeyPrefix; 3] = [
        KeyPrefix::Transaction,
        KeyPrefix::PersistentParty,
        KeyPrefix::VaultState,
    ];

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Transaction => b"t:",
            KeyPrefix::PersistentParty => b"p:",
            KeyPrefix::VaultState => b"v:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Row key; big-endian so that byte order is row order.
    pub fn row_key(&self, seq: u32) -> Vec<u8> {
        self.key(&seq.to_be_bytes())
    }

    pub fn network_parameters_hash_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(NETWORK_PARAMETERS_HASH_KEY)
    }

    /// Row kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            KeyPrefix::Transaction => "transaction",
            KeyPrefix::PersistentParty => "persistent party",
            KeyPrefix::VaultState => "vault state",
            KeyPrefix::Metadata => "metadata",
        }
    }
}
