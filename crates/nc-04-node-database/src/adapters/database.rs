use crate::domain::{KeyPrefix, MigrationData, StorageError};
use crate::ports::{BatchOperation, KeyValueStore, NodeDatabase};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::SecureHash;
use tracing::debug;

/// `NodeDatabase` over any `KeyValueStore`.
#[derive(Debug)]
pub struct KvNodeDatabase<KV: KeyValueStore> {
    store: KV,
}

impl<KV: KeyValueStore> KvNodeDatabase<KV> {
    pub fn new(store: KV) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KV {
        &self.store
    }

    pub fn into_inner(self) -> KV {
        self.store
    }

    fn read_rows<T: DeserializeOwned>(&self, prefix: KeyPrefix) -> Result<Vec<T>, StorageError> {
        self.store
            .prefix_scan(prefix.as_bytes())?
            .into_iter()
            .map(|(key, value)| {
                bincode::deserialize(&value).map_err(|e| StorageError::CorruptRow {
                    kind: prefix.kind(),
                    key: hex_key(&key),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn stage_rows<T: Serialize>(
        prefix: KeyPrefix,
        rows: &[T],
        batch: &mut Vec<BatchOperation>,
    ) -> Result<(), StorageError> {
        for (index, row) in rows.iter().enumerate() {
            let seq = u32::try_from(index).map_err(|_| StorageError::TooManyRows {
                kind: prefix.kind(),
                count: rows.len(),
            })?;
            let value = bincode::serialize(row).map_err(|e| StorageError::Encode {
                kind: prefix.kind(),
                index,
                message: e.to_string(),
            })?;
            batch.push(BatchOperation::put(prefix.row_key(seq), value));
        }
        Ok(())
    }
}

impl<KV: KeyValueStore> NodeDatabase for KvNodeDatabase<KV> {
    fn read_core_data(&self) -> Result<MigrationData, StorageError> {
        Ok(MigrationData {
            transactions: self.read_rows(KeyPrefix::Transaction)?,
            persistent_parties: self.read_rows(KeyPrefix::PersistentParty)?,
            vault_states: self.read_rows(KeyPrefix::VaultState)?,
        })
    }

    fn write_core_data(&mut self, data: &MigrationData) -> Result<(), StorageError> {
        let mut batch = Vec::with_capacity(data.row_count());
        for prefix in KeyPrefix::CORE_ROWS {
            for (key, _) in self.store.prefix_scan(prefix.as_bytes())? {
                batch.push(BatchOperation::delete(key));
            }
        }
        Self::stage_rows(KeyPrefix::Transaction, &data.transactions, &mut batch)?;
        Self::stage_rows(KeyPrefix::PersistentParty, &data.persistent_parties, &mut batch)?;
        Self::stage_rows(KeyPrefix::VaultState, &data.vault_states, &mut batch)?;

        debug!("[nc-04] Writing {} core rows", data.row_count());
        self.store.atomic_batch_write(batch)?;
        Ok(())
    }

    fn read_network_parameters_hash(&self) -> Result<SecureHash, StorageError> {
        let key = KeyPrefix::network_parameters_hash_key();
        let bytes = self
            .store
            .get(&key)?
            .ok_or(StorageError::MissingNetworkParametersHash)?;
        let hash: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| StorageError::CorruptRow {
                kind: KeyPrefix::Metadata.kind(),
                key: hex_key(&key),
                message: format!("expected 32 bytes, found {}", bytes.len()),
            })?;
        Ok(SecureHash(hash))
    }

    fn write_network_parameters_hash(&mut self, hash: SecureHash) -> Result<(), StorageError> {
        self.store
            .put(&KeyPrefix::network_parameters_hash_key(), hash.as_bytes())?;
        Ok(())
    }
}

/// Printable form of a key: the ASCII prefix then hex.
fn hex_key(key: &[u8]) -> String {
    match key.iter().position(|b| *b == b':') {
        Some(split) => format!(
            "{}{}",
            String::from_utf8_lossy(&key[..=split]),
            hex::encode(&key[split + 1..])
        ),
        None => hex::encode(key),
    }
}
