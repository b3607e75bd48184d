use shared_types::SecureHash;
use std::fmt;

/// What a node migration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub node: String,
    pub transactions: usize,
    pub persistent_parties: usize,
    pub vault_states: usize,
    pub source_network_parameters_hash: SecureHash,
    pub target_network_parameters_hash: SecureHash,
    /// Nothing was written.
    pub dry_run: bool,
}

impl MigrationReport {
    pub fn total_rows(&self) -> usize {
        self.transactions + self.persistent_parties + self.vault_states
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} transactions, {} persistent parties, {} vault states{}",
            self.node,
            self.transactions,
            self.persistent_parties,
            self.vault_states,
            if self.dry_run { " (dry run)" } else { "" }
        )
    }
}
