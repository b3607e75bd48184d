//! # Snapshot Fixtures
//!
//! Builds a complete snapshot in a temporary directory:
//!
//! ```text
//! <tmp>/
//! ├── source/
//! │   ├── client/     node-identity.json, persistence.db (IOU tx, 2 parties, 1 vault state)
//! │   ├── operator/   node-identity.json, persistence.db (same IOU tx, 1 vault state)
//! │   └── notary/     node-identity.json, persistence.db (no core rows)
//! ├── destination/
//! │   └── <node>/     node-identity.json, persistence.db (network parameters hash only)
//! └── tx-editor-plugins/cordapps.json   {"cordapps": ["iou"]}
//! ```
//!
//! Every source and pre-registered destination key is randomly generated.

use chrono::{TimeZone, Utc};
use cloner_runtime::{ClonerConfig, PERSISTENCE_FILE};
use nc_01_identity_space::{KeyPair, NodesDirPartyRepository};
use nc_02_transaction_codec::{
    AttachmentConstraint, BincodeTransactionSerializer, Command, SchemaRegistry, Serializer,
    TimeWindow, TransactionComponents, TransactionSignature, TransactionState,
};
use nc_03_tx_editors::CORDAPPS_MANIFEST;
use nc_04_node_database::{
    FileBackedKVStore, KvNodeDatabase, MigrationData, NodeDatabase, PersistentParty,
    RelevancyStatus, StateStatus, TransactionRow, TransactionStatus, VaultState,
};
use nc_cordapp_iou::{IouCommand, IouSchema, IouState, IOU_CONTRACT_CLASS, IOU_STATE_CLASS};
use shared_types::{AnonymousParty, LegalName, Party, PublicKey, SecureHash, StateRef};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const CLIENT: &str = "O=Client,L=London,C=GB";
pub const OPERATOR: &str = "O=Operator,L=New York,C=US";
pub const NOTARY: &str = "O=Notary Service,L=Zurich,C=CH";

pub const NODES: [&str; 3] = ["client", "notary", "operator"];

pub fn name(s: &str) -> LegalName {
    LegalName::parse(s).unwrap()
}

pub fn source_network_parameters_hash() -> SecureHash {
    SecureHash::sha256(b"source network parameters")
}

pub fn destination_network_parameters_hash() -> SecureHash {
    SecureHash::sha256(b"destination network parameters")
}

/// Serializer that knows the IOU state schema.
pub fn iou_serializer() -> BincodeTransactionSerializer {
    BincodeTransactionSerializer::new(SchemaRegistry::new().with_schema(Arc::new(IouSchema)))
}

fn random_party(s: &str) -> Party {
    Party::new(name(s), KeyPair::generate().public_key())
}

/// The three parties of one network.
#[derive(Debug, Clone)]
pub struct NetworkParties {
    pub client: Party,
    pub operator: Party,
    pub notary: Party,
}

impl NetworkParties {
    pub fn generate() -> Self {
        Self {
            client: random_party(CLIENT),
            operator: random_party(OPERATOR),
            notary: random_party(NOTARY),
        }
    }

    pub fn for_node(&self, node: &str) -> &Party {
        match node {
            "client" => &self.client,
            "operator" => &self.operator,
            _ => &self.notary,
        }
    }

    pub fn keys(&self) -> Vec<PublicKey> {
        vec![
            self.client.owning_key,
            self.operator.owning_key,
            self.notary.owning_key,
        ]
    }
}

/// Fixture contents, kept for assertions.
pub struct SnapshotFixture {
    pub dir: TempDir,
    pub source: NetworkParties,
    /// Parties registered on destination before the run. Their keys are
    /// replaced by the identity space.
    pub destination: NetworkParties,
    /// Confidential key owned by the operator.
    pub operator_confidential_key: PublicKey,
    pub iou: IouState,
    pub tx_id: SecureHash,
    pub source_blob: Vec<u8>,
}

impl SnapshotFixture {
    /// Snapshot with the IOU cordapp listed in the plugin manifest.
    pub fn build() -> Self {
        let fixture = Self::build_without_manifest();
        fixture.write_manifest(&["iou"]);
        fixture
    }

    /// Snapshot with no plugin manifest.
    pub fn build_without_manifest() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = NetworkParties::generate();
        let destination = NetworkParties::generate();
        let operator_confidential_key = KeyPair::generate().public_key();

        let iou = IouState {
            lender: source.client.clone(),
            borrower: source.operator.clone(),
            amount: 1_000,
            currency: "GBP".to_string(),
            linear_id: SecureHash::sha256(b"iou-0001"),
        };
        let components = iou_components(&iou, &source);
        let serializer = iou_serializer();
        let tx = serializer.recompose(&components).unwrap();
        let tx_id = tx.id();
        let source_blob = serializer.serialize_db_blob(&tx).unwrap();

        let fixture = Self {
            dir,
            source,
            destination,
            operator_confidential_key,
            iou,
            tx_id,
            source_blob,
        };

        for node in NODES {
            let confidential = if node == "operator" {
                vec![fixture.operator_confidential_key]
            } else {
                vec![]
            };
            NodesDirPartyRepository::write_node_identity(
                &fixture.source_node_dir(node),
                fixture.source.for_node(node),
                &confidential,
            )
            .unwrap();
            NodesDirPartyRepository::write_node_identity(
                &fixture.destination_node_dir(node),
                fixture.destination.for_node(node),
                &[],
            )
            .unwrap();

            let mut source_db = fixture.source_db(node);
            source_db.write_core_data(&fixture.source_rows(node)).unwrap();
            source_db
                .write_network_parameters_hash(source_network_parameters_hash())
                .unwrap();

            fixture
                .destination_db(node)
                .write_network_parameters_hash(destination_network_parameters_hash())
                .unwrap();
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root().join("tx-editor-plugins")
    }

    pub fn write_manifest(&self, cordapps: &[&str]) {
        fs::create_dir_all(self.plugins_dir()).unwrap();
        let quoted: Vec<String> = cordapps.iter().map(|c| format!("\"{}\"", c)).collect();
        fs::write(
            self.plugins_dir().join(CORDAPPS_MANIFEST),
            format!("{{\"cordapps\": [{}]}}", quoted.join(", ")),
        )
        .unwrap();
    }

    pub fn source_node_dir(&self, node: &str) -> PathBuf {
        self.root().join("source").join(node)
    }

    pub fn destination_node_dir(&self, node: &str) -> PathBuf {
        self.root().join("destination").join(node)
    }

    pub fn source_db(&self, node: &str) -> KvNodeDatabase<FileBackedKVStore> {
        open_file_db(&self.source_node_dir(node))
    }

    pub fn destination_db(&self, node: &str) -> KvNodeDatabase<FileBackedKVStore> {
        open_file_db(&self.destination_node_dir(node))
    }

    /// Cloner configuration pointing at this snapshot.
    pub fn config(&self) -> ClonerConfig {
        ClonerConfig {
            snapshot_dir: self.root().to_path_buf(),
            ..ClonerConfig::default()
        }
    }

    /// The one state produced by the IOU transaction.
    pub fn iou_state_ref(&self) -> StateRef {
        StateRef::new(self.tx_id, 0)
    }

    /// Core rows stored in a source node.
    pub fn source_rows(&self, node: &str) -> MigrationData {
        let recorded = Utc.with_ymd_and_hms(2022, 3, 14, 9, 30, 0).unwrap();
        let transaction = TransactionRow {
            tx_id: self.tx_id,
            transaction: self.source_blob.clone(),
            status: TransactionStatus::Verified,
            timestamp: recorded,
        };
        let vault_state = VaultState {
            state_ref: self.iou_state_ref(),
            notary: self.source.notary.clone(),
            contract_state_class_name: IOU_STATE_CLASS.to_string(),
            state_status: StateStatus::Unconsumed,
            recorded_time: recorded,
            consumed_time: None,
            lock_id: None,
            relevancy_status: RelevancyStatus::Relevant,
            lock_update_time: None,
            constraint_type: "ALWAYS_ACCEPT".to_string(),
            constraint_data: None,
        };

        match node {
            "client" => MigrationData {
                transactions: vec![transaction],
                persistent_parties: vec![
                    PersistentParty {
                        state_ref: self.iou_state_ref(),
                        party: self.source.client.clone().into(),
                    },
                    PersistentParty {
                        state_ref: self.iou_state_ref(),
                        party: AnonymousParty {
                            owning_key: self.operator_confidential_key,
                        }
                        .into(),
                    },
                ],
                vault_states: vec![vault_state],
            },
            "operator" => MigrationData {
                transactions: vec![transaction],
                persistent_parties: vec![],
                vault_states: vec![vault_state],
            },
            _ => MigrationData::default(),
        }
    }
}

fn open_file_db(node_dir: &Path) -> KvNodeDatabase<FileBackedKVStore> {
    KvNodeDatabase::new(FileBackedKVStore::open(node_dir.join(PERSISTENCE_FILE)).unwrap())
}

/// One IOU issued by the client to the operator, signed by the client.
pub fn iou_components(iou: &IouState, parties: &NetworkParties) -> TransactionComponents {
    TransactionComponents {
        inputs: vec![],
        outputs: vec![TransactionState {
            data: Arc::new(iou.clone()),
            contract: IOU_CONTRACT_CLASS.to_string(),
            notary: parties.notary.clone(),
            encumbrance: None,
            constraint: AttachmentConstraint::AlwaysAccept,
        }],
        commands: vec![Command {
            value: IouCommand::Create.to_command_data().unwrap(),
            signers: vec![parties.client.owning_key],
        }],
        attachments: vec![SecureHash::sha256(b"iou-contracts.jar")],
        notary: Some(parties.notary.clone()),
        time_window: Some(TimeWindow {
            from: Some(1_647_250_000),
            until: Some(1_647_253_600),
        }),
        references: vec![],
        network_parameters_hash: Some(source_network_parameters_hash()),
        privacy_salt: [7; 32],
        signatures: vec![TransactionSignature {
            by: parties.client.owning_key,
            bytes: vec![0xAB; 64],
        }],
    }
}
