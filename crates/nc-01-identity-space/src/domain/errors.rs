//! # Identity Errors

use super::entities::NetworkSide;
use crate::ports::RepositoryError;
use std::fmt;
use thiserror::Error;

/// The lookup that failed, for operator-facing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    SourceName,
    DestinationName,
    SourceKey,
    SourceAnonymousKey,
    DestinationAnonymousKey,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LookupKind::SourceName => "source legal name",
            LookupKind::DestinationName => "destination legal name",
            LookupKind::SourceKey => "source owning key",
            LookupKind::SourceAnonymousKey => "source anonymous key",
            LookupKind::DestinationAnonymousKey => "destination anonymous key",
        };
        write!(f, "{}", label)
    }
}

/// Errors raised while building or querying an identity space.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No counterpart exists for the identity. Always fatal to the caller.
    #[error("Identity mapping not found for {lookup}: {key}")]
    MappingNotFound { lookup: LookupKind, key: String },

    /// A repository violates the uniqueness rules the mapping depends on.
    #[error("Inconsistent {side} repository: {reason}")]
    InconsistentRepository { side: NetworkSide, reason: String },

    /// The repository itself could not be read.
    #[error("{side} repository unavailable: {source}")]
    Repository {
        side: NetworkSide,
        #[source]
        source: RepositoryError,
    },
}

impl IdentityError {
    pub(crate) fn not_found(lookup: LookupKind, key: impl fmt::Display) -> Self {
        IdentityError::MappingNotFound {
            lookup,
            key: key.to_string(),
        }
    }

    /// Whether this is the `MappingNotFound` kind.
    pub fn is_mapping_not_found(&self) -> bool {
        matches!(self, IdentityError::MappingNotFound { .. })
    }
}
