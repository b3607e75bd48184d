//! # Outbound Ports
//!
//! The serializer capability used by the migration pipeline. Implementations
//! must be deterministic: the same components always encode to the same bytes.

use crate::domain::{CodecError, SignedTransaction, TransactionComponents};

/// Blob ↔ transaction ↔ components conversion.
pub trait Serializer: Send + Sync {
    /// Decode a stored blob. Rejects unknown schema versions and any blob
    /// that is not in canonical form.
    fn deserialize_db_blob(&self, blob: &[u8]) -> Result<SignedTransaction, CodecError>;

    /// Encode a transaction into its stored blob form.
    fn serialize_db_blob(&self, transaction: &SignedTransaction) -> Result<Vec<u8>, CodecError>;

    /// Decode every component group into editable form.
    fn decompose(&self, transaction: &SignedTransaction)
        -> Result<TransactionComponents, CodecError>;

    /// Re-encode components. Signatures are carried over unchanged.
    fn recompose(&self, components: &TransactionComponents)
        -> Result<SignedTransaction, CodecError>;
}
