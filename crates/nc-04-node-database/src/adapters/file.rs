use super::memory::{apply_batch, scan};
use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key-value store persisted to a single file (`persistence.db`).
///
/// File format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`.
/// Every write rewrites the file through a temp file and a rename, so a
/// crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes).map_err(|message| KVStoreError::CorruptionError {
                    message: format!("{}: {}", path.display(), message),
                })?;
                info!("[nc-04] Loaded {} keys from {}", data.len(), path.display());
                data
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("[nc-04] No storage file at {}", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(KVStoreError::io(format!("{}: {}", path.display(), err))),
        };
        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(KVStoreError::io)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&encode_len(key.len())?);
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&encode_len(value.len())?);
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(KVStoreError::io)?;
        file.write_all(&bytes).map_err(KVStoreError::io)?;
        file.sync_all().map_err(KVStoreError::io)?;
        fs::rename(&temp_path, &self.path).map_err(KVStoreError::io)
    }

    /// Persist a modified copy, then adopt it.
    fn commit(&mut self, data: BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        self.save(&data)?;
        self.data = data;
        Ok(())
    }
}

/// Little-endian length header. Entries over `u32::MAX` bytes cannot be stored.
fn encode_len(len: usize) -> Result<[u8; 4], KVStoreError> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| KVStoreError::io(format!("entry of {} bytes exceeds the file format limit", len)))
}

fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, String> {
    fn take<'a>(bytes: &'a [u8], cursor: &mut usize) -> Result<&'a [u8], String> {
        let header = bytes
            .get(*cursor..*cursor + 4)
            .ok_or_else(|| format!("truncated length at offset {}", cursor))?;
        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        *cursor += 4;
        let body = bytes
            .get(*cursor..*cursor + len)
            .ok_or_else(|| format!("truncated entry at offset {}", cursor))?;
        *cursor += len;
        Ok(body)
    }

    let mut data = BTreeMap::new();
    let mut cursor = 0;
    while cursor < bytes.len() {
        let key = take(bytes, &mut cursor)?.to_vec();
        let value = take(bytes, &mut cursor)?.to_vec();
        data.insert(key, value);
    }
    Ok(data)
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let mut data = self.data.clone();
        data.insert(key.to_vec(), value.to_vec());
        self.commit(data)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        let mut data = self.data.clone();
        data.remove(key);
        self.commit(data)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut data = self.data.clone();
        apply_batch(&mut data, operations);
        self.commit(data)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}
