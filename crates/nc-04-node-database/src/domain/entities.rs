//! # Row Entities
//!
//! Rows are copied verbatim except for identity-bearing fields and state refs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AbstractParty, Party, SecureHash, StateRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Verified,
    Unverified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateStatus {
    Unconsumed,
    Consumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelevancyStatus {
    Relevant,
    NotRelevant,
}

/// A recorded transaction blob with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub tx_id: SecureHash,
    pub transaction: Vec<u8>,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}

/// Association of a state with one of its participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentParty {
    pub state_ref: StateRef,
    pub party: AbstractParty,
}

/// Vault bookkeeping for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    pub state_ref: StateRef,
    pub notary: Party,
    pub contract_state_class_name: String,
    pub state_status: StateStatus,
    pub recorded_time: DateTime<Utc>,
    pub consumed_time: Option<DateTime<Utc>>,
    pub lock_id: Option<String>,
    pub relevancy_status: RelevancyStatus,
    pub lock_update_time: Option<DateTime<Utc>>,
    pub constraint_type: String,
    pub constraint_data: Option<Vec<u8>>,
}

/// Everything a migration reads from, and writes to, one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationData {
    pub transactions: Vec<TransactionRow>,
    pub persistent_parties: Vec<PersistentParty>,
    pub vault_states: Vec<VaultState>,
}

impl MigrationData {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.persistent_parties.is_empty()
            && self.vault_states.is_empty()
    }

    /// Total number of rows.
    pub fn row_count(&self) -> usize {
        self.transactions.len() + self.persistent_parties.len() + self.vault_states.len()
    }
}
