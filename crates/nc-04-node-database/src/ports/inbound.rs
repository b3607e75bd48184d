use crate::domain::{MigrationData, StorageError};
use shared_types::SecureHash;

/// Access to one node's migration-relevant rows.
pub trait NodeDatabase: Send + Sync {
    /// All transactions, persistent parties and vault states, in stored order.
    fn read_core_data(&self) -> Result<MigrationData, StorageError>;

    /// Replace every core row with `data` in one atomic write.
    fn write_core_data(&mut self, data: &MigrationData) -> Result<(), StorageError>;

    fn read_network_parameters_hash(&self) -> Result<SecureHash, StorageError>;

    fn write_network_parameters_hash(&mut self, hash: SecureHash) -> Result<(), StorageError>;
}
