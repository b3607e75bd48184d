//! # Node Migration Service

use crate::cache::LoadedCordapps;
use crate::domain::{MigrationError, MigrationReport, RowKind, StateRefAllocator};
use nc_01_identity_space::{IdentityError, IdentitySpaceApi};
use nc_02_transaction_codec::Serializer;
use nc_03_tx_editors::{EditorChain, MigrationContext};
use nc_04_node_database::{
    MigrationData, NodeDatabase, PersistentParty, TransactionRow, VaultState,
};
use shared_types::{AbstractParty, Party, SecureHash};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Knobs for a node migration.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Overrides the hash read from the destination database.
    pub target_network_parameters_hash: Option<SecureHash>,
    /// Run every step but skip the destination write.
    pub dry_run: bool,
    /// Fail a transaction whose outputs still list source participants.
    pub verify_participants: bool,
    pub auxiliary_substitutions: BTreeMap<String, String>,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            target_network_parameters_hash: None,
            dry_run: false,
            verify_participants: true,
            auxiliary_substitutions: BTreeMap::new(),
        }
    }
}

/// Migrates node databases using one identity space and one snapshot's
/// serializer and editors. Stateless between nodes.
pub struct NodeMigrationService {
    identity_space: Arc<dyn IdentitySpaceApi>,
    serializer: Arc<dyn Serializer>,
    chain: EditorChain,
    options: MigrationOptions,
}

impl NodeMigrationService {
    pub fn new(
        identity_space: Arc<dyn IdentitySpaceApi>,
        serializer: Arc<dyn Serializer>,
        chain: EditorChain,
        options: MigrationOptions,
    ) -> Self {
        Self {
            identity_space,
            serializer,
            chain,
            options,
        }
    }

    /// Built-in editors followed by the snapshot's cordapp editors.
    pub fn with_cordapps(
        identity_space: Arc<dyn IdentitySpaceApi>,
        cordapps: &LoadedCordapps,
        options: MigrationOptions,
    ) -> Self {
        Self::new(
            identity_space,
            cordapps.serializer.clone(),
            EditorChain::new(cordapps.tx_editors.clone()),
            options,
        )
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    pub fn chain(&self) -> &EditorChain {
        &self.chain
    }

    /// Context for one node: source hash from the source database, target
    /// hash from the options or else the destination database.
    pub fn build_context(
        &self,
        node: &str,
        source_db: &dyn NodeDatabase,
        destination_db: &dyn NodeDatabase,
    ) -> Result<MigrationContext, MigrationError> {
        let source_hash = source_db
            .read_network_parameters_hash()
            .map_err(|source| MigrationError::ReadSource {
                node: node.to_string(),
                source,
            })?;
        let target_hash = match self.options.target_network_parameters_hash {
            Some(hash) => hash,
            None => destination_db.read_network_parameters_hash().map_err(|source| {
                MigrationError::ReadDestination {
                    node: node.to_string(),
                    source,
                }
            })?,
        };
        Ok(MigrationContext::new(
            self.identity_space.clone(),
            source_hash,
            target_hash,
            self.options.auxiliary_substitutions.clone(),
        ))
    }

    /// Migrate one node. Writes the destination rows in one batch unless
    /// this is a dry run.
    pub fn migrate_node(
        &self,
        node: &str,
        source_db: &dyn NodeDatabase,
        destination_db: &mut dyn NodeDatabase,
    ) -> Result<MigrationReport, MigrationError> {
        let context = self.build_context(node, source_db, destination_db)?;
        let source = source_db
            .read_core_data()
            .map_err(|source| MigrationError::ReadSource {
                node: node.to_string(),
                source,
            })?;
        info!(
            "[nc-05] Migrating node {}: {} transactions, {} persistent parties, {} vault states",
            node,
            source.transactions.len(),
            source.persistent_parties.len(),
            source.vault_states.len()
        );

        let (destination, report) = self.migrate_data(node, &source, &context)?;

        if self.options.dry_run {
            info!("[nc-05] Dry run, nothing written for node {}", node);
        } else {
            destination_db
                .write_core_data(&destination)
                .map_err(|source| MigrationError::WriteDestination {
                    node: node.to_string(),
                    source,
                })?;
        }
        info!("[nc-05] Migrated {}", report);
        Ok(report)
    }

    /// Pure part of a node migration: source rows in, destination rows out.
    pub fn migrate_data(
        &self,
        node: &str,
        source: &MigrationData,
        context: &MigrationContext,
    ) -> Result<(MigrationData, MigrationReport), MigrationError> {
        let transactions = source
            .transactions
            .iter()
            .enumerate()
            .map(|(index, row)| self.migrate_transaction(node, index, row, context))
            .collect::<Result<Vec<_>, _>>()?;

        let mut allocator = StateRefAllocator::new();
        let persistent_parties = source
            .persistent_parties
            .iter()
            .enumerate()
            .map(|(index, row)| self.migrate_persistent_party(node, index, row, &mut allocator))
            .collect::<Result<Vec<_>, _>>()?;
        let vault_states = source
            .vault_states
            .iter()
            .enumerate()
            .map(|(index, row)| self.migrate_vault_state(node, index, row, &mut allocator))
            .collect::<Result<Vec<_>, _>>()?;

        let report = MigrationReport {
            node: node.to_string(),
            transactions: transactions.len(),
            persistent_parties: persistent_parties.len(),
            vault_states: vault_states.len(),
            source_network_parameters_hash: context.source_network_parameters_hash(),
            target_network_parameters_hash: context.target_network_parameters_hash(),
            dry_run: self.options.dry_run,
        };
        Ok((
            MigrationData {
                transactions,
                persistent_parties,
                vault_states,
            },
            report,
        ))
    }

    fn migrate_transaction(
        &self,
        node: &str,
        index: usize,
        row: &TransactionRow,
        context: &MigrationContext,
    ) -> Result<TransactionRow, MigrationError> {
        let codec_error = |source| MigrationError::Codec {
            node: node.to_string(),
            index,
            tx_id: row.tx_id,
            source,
        };
        let editor_error = |source| MigrationError::Editor {
            node: node.to_string(),
            index,
            tx_id: row.tx_id,
            source,
        };

        let transaction = self
            .serializer
            .deserialize_db_blob(&row.transaction)
            .map_err(codec_error)?;
        let components = self.serializer.decompose(&transaction).map_err(codec_error)?;
        let edited = self.chain.apply(components, context).map_err(editor_error)?;
        if self.options.verify_participants {
            EditorChain::verify_participants(&edited, context).map_err(editor_error)?;
        }
        let recomposed = self.serializer.recompose(&edited).map_err(codec_error)?;
        let blob = self
            .serializer
            .serialize_db_blob(&recomposed)
            .map_err(codec_error)?;

        debug!("[nc-05] Node {}: transaction {} ({}) migrated", node, index, row.tx_id);
        Ok(TransactionRow {
            transaction: blob,
            ..row.clone()
        })
    }

    fn migrate_persistent_party(
        &self,
        node: &str,
        index: usize,
        row: &PersistentParty,
        allocator: &mut StateRefAllocator,
    ) -> Result<PersistentParty, MigrationError> {
        let identity_error = |source: IdentityError| MigrationError::Identity {
            node: node.to_string(),
            kind: RowKind::PersistentParty,
            index,
            identity: row.party.to_string(),
            source,
        };

        // Anonymous keys are attributed to their owner, then mapped by name.
        let source_party = match &row.party {
            AbstractParty::Party(party) => party.clone(),
            AbstractParty::Anonymous(anonymous) => self
                .identity_space
                .source_party_from_anonymous(&anonymous.owning_key)
                .map_err(identity_error)?,
        };
        let destination = self
            .identity_space
            .find_destination_for_source_party(&AbstractParty::Party(source_party))
            .map_err(identity_error)?;

        Ok(PersistentParty {
            state_ref: allocator.allocate(&row.state_ref),
            party: AbstractParty::Party(destination),
        })
    }

    fn migrate_vault_state(
        &self,
        node: &str,
        index: usize,
        row: &VaultState,
        allocator: &mut StateRefAllocator,
    ) -> Result<VaultState, MigrationError> {
        let notary: Party = self
            .identity_space
            .destination_party_from_name(&row.notary.name)
            .map_err(|source| MigrationError::Identity {
                node: node.to_string(),
                kind: RowKind::VaultState,
                index,
                identity: row.notary.name.to_string(),
                source,
            })?;

        Ok(VaultState {
            state_ref: allocator.allocate(&row.state_ref),
            notary,
            ..row.clone()
        })
    }
}
