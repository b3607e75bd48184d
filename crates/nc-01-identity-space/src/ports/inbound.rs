//! # Inbound Ports (Driving Ports)
//!
//! The lookup surface editors and the orchestrator use.

use crate::domain::{IdentityError, IdentityMapping};
use shared_types::{AbstractParty, LegalName, Party, PublicKey};

/// Read-only queries over a built identity space.
///
/// Every lookup is total over the mapping: a miss is an
/// [`IdentityError::MappingNotFound`], never a placeholder party.
pub trait IdentitySpaceApi: Send + Sync {
    /// All mapping entries, ordered by legal name.
    fn identities(&self) -> &[IdentityMapping];

    /// Destination counterpart of a source participant. Anonymous
    /// participants are attributed to their owner first.
    fn find_destination_for_source_party(
        &self,
        party: &AbstractParty,
    ) -> Result<Party, IdentityError>;

    /// Destination counterpart of a source signing key (well-known or confidential).
    fn find_destination_for_source_key(&self, key: &PublicKey) -> Result<Party, IdentityError>;

    fn source_party_from_name(&self, name: &LegalName) -> Result<Party, IdentityError>;

    fn destination_party_from_name(&self, name: &LegalName) -> Result<Party, IdentityError>;

    /// Owner of a source-side key.
    fn source_party_from_anonymous(&self, key: &PublicKey) -> Result<Party, IdentityError>;

    /// Owner of a destination-side key.
    fn destination_party_from_anonymous(&self, key: &PublicKey) -> Result<Party, IdentityError>;
}
