//! # Wire Model
//!
//! Serialized form of a recorded transaction. Each component is encoded on
//! its own so that a transaction id can be derived from component bytes
//! without decoding application payloads.
//!
//! ## Canonical Layout
//!
//! - groups appear in ascending [`ComponentGroupKind`] order, at most once
//! - empty groups are omitted
//! - notary, time window and parameters groups hold exactly one component
//! - the signers group is index aligned with the commands group

use crate::domain::components::{PrivacySalt, TransactionSignature};
use crate::domain::errors::CodecError;
use serde::{Deserialize, Serialize};
use shared_types::SecureHash;

/// Leading bytes of every db blob.
pub const DB_BLOB_MAGIC: [u8; 4] = *b"NCTX";

/// Only schema version this codec reads or writes.
pub const WIRE_SCHEMA_VERSION: u16 = 1;

/// Component group discriminants, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ComponentGroupKind {
    Inputs = 0,
    Outputs = 1,
    Commands = 2,
    Attachments = 3,
    Notary = 4,
    TimeWindow = 5,
    Signers = 6,
    References = 7,
    Parameters = 8,
}

impl ComponentGroupKind {
    pub fn from_u8(value: u8) -> Result<Self, CodecError> {
        Ok(match value {
            0 => Self::Inputs,
            1 => Self::Outputs,
            2 => Self::Commands,
            3 => Self::Attachments,
            4 => Self::Notary,
            5 => Self::TimeWindow,
            6 => Self::Signers,
            7 => Self::References,
            8 => Self::Parameters,
            other => return Err(CodecError::UnknownComponentGroup(other)),
        })
    }

    fn is_singleton(self) -> bool {
        matches!(self, Self::Notary | Self::TimeWindow | Self::Parameters)
    }
}

/// One group of individually encoded components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub kind: u8,
    pub components: Vec<Vec<u8>>,
}

impl ComponentGroup {
    pub fn new(kind: ComponentGroupKind, components: Vec<Vec<u8>>) -> Self {
        Self {
            kind: kind as u8,
            components,
        }
    }
}

/// The signed-over part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub component_groups: Vec<ComponentGroup>,
    pub privacy_salt: PrivacySalt,
}

impl WireTransaction {
    /// Components of a group, empty when the group is absent.
    pub fn group(&self, kind: ComponentGroupKind) -> &[Vec<u8>] {
        self.component_groups
            .iter()
            .find(|g| g.kind == kind as u8)
            .map(|g| g.components.as_slice())
            .unwrap_or(&[])
    }

    /// Salted hash over every component, in group order.
    pub fn id(&self) -> SecureHash {
        let mut preimage = Vec::with_capacity(32 + self.component_groups.len() * 64);
        preimage.extend_from_slice(&self.privacy_salt);
        for group in &self.component_groups {
            preimage.push(group.kind);
            for component in &group.components {
                preimage.extend_from_slice(SecureHash::sha256(component).as_bytes());
            }
        }
        SecureHash::sha256(&preimage)
    }

    /// Check the canonical group layout.
    pub fn validate_layout(&self) -> Result<(), CodecError> {
        let mut previous: Option<ComponentGroupKind> = None;
        for group in &self.component_groups {
            let kind = ComponentGroupKind::from_u8(group.kind)?;
            if let Some(prev) = previous {
                if kind <= prev {
                    return Err(CodecError::NonCanonicalEncoding {
                        reason: format!("group {:?} out of order after {:?}", kind, prev),
                    });
                }
            }
            if group.components.is_empty() {
                return Err(CodecError::NonCanonicalEncoding {
                    reason: format!("empty {:?} group", kind),
                });
            }
            if kind.is_singleton() && group.components.len() != 1 {
                return Err(CodecError::NonCanonicalEncoding {
                    reason: format!(
                        "{:?} group holds {} components",
                        kind,
                        group.components.len()
                    ),
                });
            }
            previous = Some(kind);
        }

        let commands = self.group(ComponentGroupKind::Commands).len();
        let signers = self.group(ComponentGroupKind::Signers).len();
        if commands != signers {
            return Err(CodecError::NonCanonicalEncoding {
                reason: format!("{} commands but {} signer lists", commands, signers),
            });
        }
        Ok(())
    }
}

/// A wire transaction with its signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub wire: WireTransaction,
    pub sigs: Vec<TransactionSignature>,
}

impl SignedTransaction {
    pub fn id(&self) -> SecureHash {
        self.wire.id()
    }
}

/// Versioned envelope stored in a node's transaction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbBlob {
    pub magic: [u8; 4],
    pub schema_version: u16,
    pub transaction: SignedTransaction,
}

impl DbBlob {
    pub fn new(transaction: SignedTransaction) -> Self {
        Self {
            magic: DB_BLOB_MAGIC,
            schema_version: WIRE_SCHEMA_VERSION,
            transaction,
        }
    }
}
