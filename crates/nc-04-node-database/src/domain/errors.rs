use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl KVStoreError {
    pub fn io(err: impl ToString) -> Self {
        Self::IOError {
            message: err.to_string(),
        }
    }
}

/// Node database errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error(transparent)]
    Store(#[from] KVStoreError),

    #[error("corrupt {kind} row {key}: {message}")]
    CorruptRow {
        kind: &'static str,
        key: String,
        message: String,
    },

    #[error("failed to encode {kind} row {index}: {message}")]
    Encode {
        kind: &'static str,
        index: usize,
        message: String,
    },

    #[error("node has no network parameters hash")]
    MissingNetworkParametersHash,

    #[error("too many {kind} rows: {count}")]
    TooManyRows { kind: &'static str, count: usize },
}
