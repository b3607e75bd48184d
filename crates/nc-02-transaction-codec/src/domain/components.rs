//! # Transaction Components
//!
//! The editable, fully decoded view of a transaction. Editors consume a
//! `TransactionComponents` and return a new one; nothing here is mutated in
//! place by the codec.

use crate::domain::contract_state::ContractState;
use serde::{Deserialize, Serialize};
use shared_types::{AbstractParty, Party, PublicKey, SecureHash, StateRef};
use std::sync::Arc;

/// Random bytes mixed into every component hash of a transaction.
pub type PrivacySalt = [u8; 32];

/// How the contract code for a state is pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentConstraint {
    AlwaysAccept,
    Hash(SecureHash),
    WhitelistedByZone,
}

/// Command payload. Application specific and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    pub class_name: String,
    pub payload: Vec<u8>,
}

/// A command together with the keys required to sign for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub value: CommandData,
    pub signers: Vec<PublicKey>,
}

/// Validity interval in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Option<i64>,
    pub until: Option<i64>,
}

/// A signature over the transaction id. Never recomputed by a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub by: PublicKey,
    pub bytes: Vec<u8>,
}

/// A transaction output.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub data: Arc<dyn ContractState>,
    pub contract: String,
    pub notary: Party,
    pub encumbrance: Option<u32>,
    pub constraint: AttachmentConstraint,
}

impl TransactionState {
    /// Same output with new state data.
    pub fn with_data(&self, data: Arc<dyn ContractState>) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }
}

/// Decoded transaction, ready for editing.
#[derive(Debug, Clone)]
pub struct TransactionComponents {
    pub inputs: Vec<StateRef>,
    pub outputs: Vec<TransactionState>,
    pub commands: Vec<Command>,
    pub attachments: Vec<SecureHash>,
    pub notary: Option<Party>,
    pub time_window: Option<TimeWindow>,
    pub references: Vec<StateRef>,
    pub network_parameters_hash: Option<SecureHash>,
    pub privacy_salt: PrivacySalt,
    pub signatures: Vec<TransactionSignature>,
}

impl TransactionComponents {
    /// Participants of every output, in output order.
    pub fn output_participants(&self) -> Vec<AbstractParty> {
        self.outputs
            .iter()
            .flat_map(|output| output.data.participants())
            .collect()
    }

    /// Distinct signer keys across all commands, in first-seen order.
    pub fn required_signers(&self) -> Vec<PublicKey> {
        let mut signers: Vec<PublicKey> = Vec::new();
        for key in self.commands.iter().flat_map(|c| c.signers.iter()) {
            if !signers.contains(key) {
                signers.push(*key);
            }
        }
        signers
    }
}
