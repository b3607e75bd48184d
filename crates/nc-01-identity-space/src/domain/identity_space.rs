//! # Identity Space
//!
//! The complete, immutable set of mapping entries for one migration run.

use super::entities::{IdentityMapping, NetworkSide, PartyAndPrivateKey};
use super::errors::{IdentityError, LookupKind};
use super::keys::KeyPair;
use crate::ports::{ConfidentialIdentity, IdentitySpaceApi, PartyRepository};
use shared_types::{AbstractParty, LegalName, Party, PublicKey};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Verified 1:1 mapping from source parties to re-keyed destination parties.
///
/// Built once from two repository snapshots and read-only afterwards.
#[derive(Debug)]
pub struct IdentitySpace {
    identities: Vec<IdentityMapping>,
    by_source_name: HashMap<LegalName, usize>,
    by_destination_name: HashMap<LegalName, usize>,
    by_source_key: HashMap<PublicKey, usize>,
    by_destination_key: HashMap<PublicKey, usize>,
    source_anonymous: HashMap<PublicKey, usize>,
    destination_anonymous: HashMap<PublicKey, usize>,
}

impl IdentitySpace {
    /// Match every source party to the destination party with the same name
    /// and mint a fresh key pair for it.
    ///
    /// Source parties with no destination counterpart are left out of the
    /// mapping; lookups for them fail with `MappingNotFound`.
    pub fn new(
        source: &dyn PartyRepository,
        destination: &dyn PartyRepository,
    ) -> Result<Self, IdentityError> {
        let source_parties = read_parties(source, NetworkSide::Source)?;
        let destination_parties = read_parties(destination, NetworkSide::Destination)?;

        let destination_by_name: HashMap<&LegalName, &Party> = destination_parties
            .iter()
            .map(|party| (&party.name, party))
            .collect();

        let mut identities = Vec::new();
        for source_party in &source_parties {
            let Some(registered) = destination_by_name.get(&source_party.name) else {
                debug!(
                    "[nc-01] {} has no destination counterpart, excluded",
                    source_party.name
                );
                continue;
            };

            // The registered destination key is discarded: every run re-keys.
            let key_pair = loop {
                let candidate = KeyPair::generate();
                let public = candidate.public_key();
                if public != source_party.owning_key && public != registered.owning_key {
                    break candidate;
                }
            };

            identities.push(IdentityMapping {
                source_party: source_party.clone(),
                destination_party_and_private_key: PartyAndPrivateKey {
                    party: Party::new(registered.name.clone(), key_pair.public_key()),
                    private_key: key_pair.private_key(),
                },
            });
        }

        let mut space = Self {
            by_source_name: index_by(&identities, |m| m.source_party.name.clone()),
            by_destination_name: index_by(&identities, |m| m.destination_party().name.clone()),
            by_source_key: index_by(&identities, |m| m.source_party.owning_key),
            by_destination_key: index_by(&identities, |m| m.destination_party().owning_key),
            source_anonymous: HashMap::new(),
            destination_anonymous: HashMap::new(),
            identities,
        };

        space.source_anonymous = space.anonymous_table(
            &source
                .confidential_identities()
                .map_err(|source_err| IdentityError::Repository {
                    side: NetworkSide::Source,
                    source: source_err,
                })?,
        );
        space.destination_anonymous = space.anonymous_table(
            &destination
                .confidential_identities()
                .map_err(|source_err| IdentityError::Repository {
                    side: NetworkSide::Destination,
                    source: source_err,
                })?,
        );

        info!(
            "[nc-01] Identity space built: {} mapped of {} source / {} destination parties",
            space.identities.len(),
            source_parties.len(),
            destination_parties.len()
        );
        Ok(space)
    }

    /// Number of mapping entries.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    fn anonymous_table(&self, confidential: &[ConfidentialIdentity]) -> HashMap<PublicKey, usize> {
        confidential
            .iter()
            .filter_map(|identity| match self.by_source_name.get(&identity.owner) {
                Some(index) => Some((identity.key, *index)),
                None => {
                    debug!(
                        "[nc-01] Confidential key {} owned by unmapped {}, ignored",
                        identity.key, identity.owner
                    );
                    None
                }
            })
            .collect()
    }

    fn entry(&self, index: usize) -> &IdentityMapping {
        &self.identities[index]
    }
}

impl IdentitySpaceApi for IdentitySpace {
    fn identities(&self) -> &[IdentityMapping] {
        &self.identities
    }

    fn find_destination_for_source_party(
        &self,
        party: &AbstractParty,
    ) -> Result<Party, IdentityError> {
        match party {
            AbstractParty::Party(known) => {
                let index = self
                    .by_source_name
                    .get(&known.name)
                    .ok_or_else(|| IdentityError::not_found(LookupKind::SourceName, &known.name))?;
                let entry = self.entry(*index);
                // Destination key is accepted so migrated data maps onto itself.
                if known.owning_key != entry.source_party.owning_key
                    && known.owning_key != entry.destination_party().owning_key
                {
                    return Err(IdentityError::not_found(
                        LookupKind::SourceKey,
                        &known.owning_key,
                    ));
                }
                Ok(entry.destination_party().clone())
            }
            AbstractParty::Anonymous(anonymous) => {
                self.find_destination_for_source_key(&anonymous.owning_key)
            }
        }
    }

    fn find_destination_for_source_key(&self, key: &PublicKey) -> Result<Party, IdentityError> {
        self.by_source_key
            .get(key)
            .or_else(|| self.source_anonymous.get(key))
            .map(|index| self.entry(*index).destination_party().clone())
            .ok_or_else(|| IdentityError::not_found(LookupKind::SourceKey, key))
    }

    fn source_party_from_name(&self, name: &LegalName) -> Result<Party, IdentityError> {
        self.by_source_name
            .get(name)
            .map(|index| self.entry(*index).source_party.clone())
            .ok_or_else(|| IdentityError::not_found(LookupKind::SourceName, name))
    }

    fn destination_party_from_name(&self, name: &LegalName) -> Result<Party, IdentityError> {
        self.by_destination_name
            .get(name)
            .map(|index| self.entry(*index).destination_party().clone())
            .ok_or_else(|| IdentityError::not_found(LookupKind::DestinationName, name))
    }

    fn source_party_from_anonymous(&self, key: &PublicKey) -> Result<Party, IdentityError> {
        self.by_source_key
            .get(key)
            .or_else(|| self.source_anonymous.get(key))
            .map(|index| self.entry(*index).source_party.clone())
            .ok_or_else(|| IdentityError::not_found(LookupKind::SourceAnonymousKey, key))
    }

    fn destination_party_from_anonymous(&self, key: &PublicKey) -> Result<Party, IdentityError> {
        self.by_destination_key
            .get(key)
            .or_else(|| self.destination_anonymous.get(key))
            .map(|index| self.entry(*index).destination_party().clone())
            .ok_or_else(|| IdentityError::not_found(LookupKind::DestinationAnonymousKey, key))
    }
}

/// Read a repository and reject duplicate names or keys.
fn read_parties(
    repository: &dyn PartyRepository,
    side: NetworkSide,
) -> Result<Vec<Party>, IdentityError> {
    let mut parties = repository
        .parties()
        .map_err(|source| IdentityError::Repository { side, source })?;
    parties.sort();
    parties.dedup();

    let mut names = HashSet::new();
    let mut keys = HashSet::new();
    for party in &parties {
        if !names.insert(&party.name) {
            return Err(IdentityError::InconsistentRepository {
                side,
                reason: format!("legal name {} registered with more than one key", party.name),
            });
        }
        if !keys.insert(party.owning_key) {
            return Err(IdentityError::InconsistentRepository {
                side,
                reason: format!("owning key {} shared by more than one name", party.owning_key),
            });
        }
    }
    Ok(parties)
}

fn index_by<K, F>(identities: &[IdentityMapping], key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&IdentityMapping) -> K,
{
    identities
        .iter()
        .enumerate()
        .map(|(index, mapping)| (key(mapping), index))
        .collect()
}
