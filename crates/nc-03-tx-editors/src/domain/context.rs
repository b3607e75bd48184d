use nc_01_identity_space::IdentitySpaceApi;
use shared_types::SecureHash;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Immutable parameters handed to every editor.
#[derive(Clone)]
pub struct MigrationContext {
    identity_space: Arc<dyn IdentitySpaceApi>,
    source_network_parameters_hash: SecureHash,
    target_network_parameters_hash: SecureHash,
    auxiliary_substitutions: BTreeMap<String, String>,
}

impl MigrationContext {
    pub fn new(
        identity_space: Arc<dyn IdentitySpaceApi>,
        source_network_parameters_hash: SecureHash,
        target_network_parameters_hash: SecureHash,
        auxiliary_substitutions: BTreeMap<String, String>,
    ) -> Self {
        Self {
            identity_space,
            source_network_parameters_hash,
            target_network_parameters_hash,
            auxiliary_substitutions,
        }
    }

    pub fn identity_space(&self) -> &dyn IdentitySpaceApi {
        self.identity_space.as_ref()
    }

    pub fn source_network_parameters_hash(&self) -> SecureHash {
        self.source_network_parameters_hash
    }

    pub fn target_network_parameters_hash(&self) -> SecureHash {
        self.target_network_parameters_hash
    }

    /// Free-form value substitutions for application editors.
    pub fn auxiliary_substitution(&self, key: &str) -> Option<&str> {
        self.auxiliary_substitutions.get(key).map(String::as_str)
    }

    pub fn auxiliary_substitutions(&self) -> &BTreeMap<String, String> {
        &self.auxiliary_substitutions
    }
}

impl fmt::Debug for MigrationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationContext")
            .field("identities", &self.identity_space.identities().len())
            .field("source_network_parameters_hash", &self.source_network_parameters_hash)
            .field("target_network_parameters_hash", &self.target_network_parameters_hash)
            .field("auxiliary_substitutions", &self.auxiliary_substitutions)
            .finish()
    }
}
