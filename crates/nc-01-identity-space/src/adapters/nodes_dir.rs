//! # Nodes-Directory Party Repository
//!
//! Reads identity material from a directory holding one sub-directory per node:
//!
//! ```text
//! <nodes_dir>/
//! ├── client/node-identity.json
//! ├── operator/node-identity.json
//! └── notary/node-identity.json
//! ```
//!
//! Sub-directories without `node-identity.json` are not nodes and are skipped.

use crate::domain::IdentityMapping;
use crate::ports::{ConfidentialIdentity, PartyRepository, RepositoryError};
use serde::{Deserialize, Serialize};
use shared_types::{LegalName, Party, PublicKey};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Identity file inside every node directory.
pub const NODE_IDENTITY_FILE: &str = "node-identity.json";

/// Hex-encoded private key seed written next to exported identities.
pub const NODE_KEY_FILE: &str = "node-identity.key";

#[derive(Debug, Serialize, Deserialize)]
struct NodeIdentityFile {
    legal_name: String,
    owning_key: String,
    #[serde(default)]
    confidential_keys: Vec<String>,
}

/// One node's identity as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentityRecord {
    /// Directory name of the node, e.g. `client`.
    pub node: String,
    pub node_dir: PathBuf,
    pub party: Party,
    pub confidential_keys: Vec<PublicKey>,
}

/// `PartyRepository` over a nodes directory.
#[derive(Debug, Clone)]
pub struct NodesDirPartyRepository {
    nodes_dir: PathBuf,
}

impl NodesDirPartyRepository {
    pub fn new(nodes_dir: impl Into<PathBuf>) -> Self {
        Self {
            nodes_dir: nodes_dir.into(),
        }
    }

    pub fn nodes_dir(&self) -> &Path {
        &self.nodes_dir
    }

    /// Every node with an identity file, ordered by directory name.
    pub fn node_records(&self) -> Result<Vec<NodeIdentityRecord>, RepositoryError> {
        let entries = fs::read_dir(&self.nodes_dir).map_err(|source| RepositoryError::Io {
            path: self.nodes_dir.clone(),
            source,
        })?;

        let mut node_dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepositoryError::Io {
                path: self.nodes_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() && path.join(NODE_IDENTITY_FILE).is_file() {
                node_dirs.push(path);
            } else {
                debug!("[nc-01] Skipping {}: not a node directory", path.display());
            }
        }
        node_dirs.sort();

        node_dirs.into_iter().map(|dir| read_record(&dir)).collect()
    }

    /// Write (or overwrite) a node identity file.
    pub fn write_node_identity(
        node_dir: &Path,
        party: &Party,
        confidential_keys: &[PublicKey],
    ) -> Result<(), RepositoryError> {
        fs::create_dir_all(node_dir).map_err(|source| RepositoryError::Io {
            path: node_dir.to_path_buf(),
            source,
        })?;

        let file = NodeIdentityFile {
            legal_name: party.name.to_string(),
            owning_key: party.owning_key.to_hex(),
            confidential_keys: confidential_keys.iter().map(PublicKey::to_hex).collect(),
        };
        let path = node_dir.join(NODE_IDENTITY_FILE);
        let json = serde_json::to_string_pretty(&file).map_err(|e| RepositoryError::Malformed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|source| RepositoryError::Io { path, source })
    }

    /// Replace each destination node's identity with its freshly generated one
    /// and store the matching private key seed. Returns the number of nodes updated.
    pub fn export_identities(
        &self,
        identities: &[IdentityMapping],
    ) -> Result<usize, RepositoryError> {
        let mut exported = 0;
        for record in self.node_records()? {
            let Some(mapping) = identities
                .iter()
                .find(|m| m.destination_party().name == record.party.name)
            else {
                continue;
            };

            let entry = &mapping.destination_party_and_private_key;
            Self::write_node_identity(&record.node_dir, &entry.party, &record.confidential_keys)?;

            let key_path = record.node_dir.join(NODE_KEY_FILE);
            fs::write(&key_path, entry.private_key.to_hex()).map_err(|source| {
                RepositoryError::Io {
                    path: key_path.clone(),
                    source,
                }
            })?;
            exported += 1;
        }

        info!(
            "[nc-01] Exported {} destination identities to {}",
            exported,
            self.nodes_dir.display()
        );
        Ok(exported)
    }
}

impl PartyRepository for NodesDirPartyRepository {
    fn parties(&self) -> Result<Vec<Party>, RepositoryError> {
        let mut parties: Vec<Party> = self
            .node_records()?
            .into_iter()
            .map(|record| record.party)
            .collect();
        parties.sort();
        parties.dedup();
        Ok(parties)
    }

    fn confidential_identities(&self) -> Result<Vec<ConfidentialIdentity>, RepositoryError> {
        Ok(self
            .node_records()?
            .into_iter()
            .flat_map(|record| {
                let owner = record.party.name;
                record
                    .confidential_keys
                    .into_iter()
                    .map(move |key| ConfidentialIdentity {
                        key,
                        owner: owner.clone(),
                    })
            })
            .collect())
    }
}

fn read_record(node_dir: &Path) -> Result<NodeIdentityRecord, RepositoryError> {
    let path = node_dir.join(NODE_IDENTITY_FILE);
    let malformed = |reason: String| RepositoryError::Malformed {
        path: path.clone(),
        reason,
    };

    let contents = fs::read_to_string(&path).map_err(|source| RepositoryError::Io {
        path: path.clone(),
        source,
    })?;
    let file: NodeIdentityFile =
        serde_json::from_str(&contents).map_err(|e| malformed(e.to_string()))?;

    let name = LegalName::parse(&file.legal_name).map_err(|e| malformed(e.to_string()))?;
    let owning_key = PublicKey::from_hex(&file.owning_key).map_err(|e| malformed(e.to_string()))?;
    let confidential_keys = file
        .confidential_keys
        .iter()
        .map(|key| PublicKey::from_hex(key).map_err(|e| malformed(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let node = node_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(NodeIdentityRecord {
        node,
        node_dir: node_dir.to_path_buf(),
        party: Party::new(name, owning_key),
        confidential_keys,
    })
}
