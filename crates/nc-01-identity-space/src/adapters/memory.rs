use crate::ports::{ConfidentialIdentity, PartyRepository, RepositoryError};
use shared_types::{LegalName, Party, PublicKey};

/// In-memory party repository for unit tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPartyRepository {
    parties: Vec<Party>,
    confidential: Vec<ConfidentialIdentity>,
}

impl InMemoryPartyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    pub fn with_confidential(mut self, key: PublicKey, owner: LegalName) -> Self {
        self.confidential.push(ConfidentialIdentity { key, owner });
        self
    }
}

impl PartyRepository for InMemoryPartyRepository {
    fn parties(&self) -> Result<Vec<Party>, RepositoryError> {
        let mut parties = self.parties.clone();
        parties.sort();
        parties.dedup();
        Ok(parties)
    }

    fn confidential_identities(&self) -> Result<Vec<ConfidentialIdentity>, RepositoryError> {
        Ok(self.confidential.clone())
    }
}
