//! # Outbound Ports (Driven Ports)
//!
//! Key-material access for one side of the migration.

use shared_types::{LegalName, Party, PublicKey};
use std::path::PathBuf;
use thiserror::Error;

/// A one-time key disclosed as belonging to a well-known party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialIdentity {
    pub key: PublicKey,
    pub owner: LegalName,
}

/// Source of known identities for one network side.
///
/// Production: `NodesDirPartyRepository` (node directories on disk)
/// Testing: `InMemoryPartyRepository`
pub trait PartyRepository: Send + Sync {
    /// Every well-known party, sorted and de-duplicated. An empty result is not an error.
    fn parties(&self) -> Result<Vec<Party>, RepositoryError>;

    /// Confidential keys disclosed by the repository's nodes.
    fn confidential_identities(&self) -> Result<Vec<ConfidentialIdentity>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Repository read/write failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed identity file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}
