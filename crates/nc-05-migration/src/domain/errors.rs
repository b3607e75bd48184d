use nc_01_identity_space::IdentityError;
use nc_02_transaction_codec::CodecError;
use nc_03_tx_editors::{CordappError, EditorError};
use nc_04_node_database::StorageError;
use shared_types::SecureHash;
use std::fmt;
use thiserror::Error;

/// Persisted row kinds, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    PersistentParty,
    VaultState,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::PersistentParty => write!(f, "persistent party"),
            RowKind::VaultState => write!(f, "vault state"),
        }
    }
}

/// A node migration failure, with enough context to locate the bad row.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("node {node}: cannot read source database: {source}")]
    ReadSource {
        node: String,
        #[source]
        source: StorageError,
    },

    #[error("node {node}: cannot read destination database: {source}")]
    ReadDestination {
        node: String,
        #[source]
        source: StorageError,
    },

    #[error("node {node}: cannot write destination database: {source}")]
    WriteDestination {
        node: String,
        #[source]
        source: StorageError,
    },

    #[error("node {node}: transaction {index} ({tx_id}): {source}")]
    Codec {
        node: String,
        index: usize,
        tx_id: SecureHash,
        #[source]
        source: CodecError,
    },

    #[error("node {node}: transaction {index} ({tx_id}): {source}")]
    Editor {
        node: String,
        index: usize,
        tx_id: SecureHash,
        #[source]
        source: EditorError,
    },

    #[error("node {node}: {kind} row {index} ({identity}): {source}")]
    Identity {
        node: String,
        kind: RowKind,
        index: usize,
        identity: String,
        #[source]
        source: IdentityError,
    },

    #[error("cannot load cordapps: {0}")]
    Cordapps(#[from] CordappError),
}

impl MigrationError {
    /// Node the failure belongs to, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::ReadSource { node, .. }
            | Self::ReadDestination { node, .. }
            | Self::WriteDestination { node, .. }
            | Self::Codec { node, .. }
            | Self::Editor { node, .. }
            | Self::Identity { node, .. } => Some(node),
            Self::Cordapps(_) => None,
        }
    }

    /// True when the failure is a missing identity mapping.
    pub fn is_mapping_not_found(&self) -> bool {
        match self {
            Self::Identity { source, .. } => source.is_mapping_not_found(),
            Self::Editor { source, .. } => matches!(source, EditorError::MappingNotFound { .. }),
            _ => false,
        }
    }
}
