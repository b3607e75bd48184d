//! Shared fixtures for editor tests.

use crate::domain::MigrationContext;
use nc_01_identity_space::{IdentitySpace, InMemoryPartyRepository};
use nc_02_transaction_codec::{
    AttachmentConstraint, CodecError, Command, CommandData, ContractState, TransactionComponents,
    TransactionState,
};
use shared_types::{AbstractParty, LegalName, Party, PublicKey, SecureHash};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const CLIENT: &str = "O=Client,L=London,C=GB";
pub const OPERATOR: &str = "O=Operator,L=New York,C=US";
pub const NOTARY: &str = "O=Notary Service,L=Zurich,C=CH";

pub fn name(s: &str) -> LegalName {
    LegalName::parse(s).unwrap()
}

pub fn party(s: &str, key: u8) -> Party {
    Party::new(name(s), PublicKey([key; 32]))
}

/// Source keys 1..=3, registered destination keys 11..=13.
pub fn identity_space() -> Arc<IdentitySpace> {
    let source = InMemoryPartyRepository::new()
        .with_party(party(CLIENT, 1))
        .with_party(party(OPERATOR, 2))
        .with_party(party(NOTARY, 3))
        .with_confidential(PublicKey([41; 32]), name(CLIENT));
    let destination = InMemoryPartyRepository::new()
        .with_party(party(CLIENT, 11))
        .with_party(party(OPERATOR, 12))
        .with_party(party(NOTARY, 13));
    Arc::new(IdentitySpace::new(&source, &destination).unwrap())
}

pub fn context(space: Arc<IdentitySpace>) -> MigrationContext {
    MigrationContext::new(
        space,
        SecureHash::zero_hash(),
        SecureHash::all_ones_hash(),
        BTreeMap::new(),
    )
}

/// Output state listing its participants by key.
#[derive(Debug)]
pub struct KeyedState(pub Vec<PublicKey>);

impl ContractState for KeyedState {
    fn class_name(&self) -> &str {
        "test.KeyedState"
    }

    fn participants(&self) -> Vec<AbstractParty> {
        self.0
            .iter()
            .map(|key| shared_types::AnonymousParty { owning_key: *key }.into())
            .collect()
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.0.iter().flat_map(|k| k.0).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn components(signers: Vec<PublicKey>, participants: Vec<PublicKey>) -> TransactionComponents {
    TransactionComponents {
        inputs: vec![],
        outputs: vec![TransactionState {
            data: Arc::new(KeyedState(participants)),
            contract: "test.KeyedContract".into(),
            notary: party(NOTARY, 3),
            encumbrance: None,
            constraint: AttachmentConstraint::AlwaysAccept,
        }],
        commands: vec![Command {
            value: CommandData {
                class_name: "test.Issue".into(),
                payload: vec![1],
            },
            signers,
        }],
        attachments: vec![SecureHash::sha256(b"attachment")],
        notary: Some(party(NOTARY, 3)),
        time_window: None,
        references: vec![],
        network_parameters_hash: Some(SecureHash::sha256(b"source params")),
        privacy_salt: [9; 32],
        signatures: vec![],
    }
}
