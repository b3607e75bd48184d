use crate::domain::wire::ComponentGroupKind;
use thiserror::Error;

/// Failure to decode, validate or encode a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("not a transaction blob: bad magic {found:02x?}")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u16, supported: u16 },

    #[error("non-canonical encoding: {reason}")]
    NonCanonicalEncoding { reason: String },

    #[error("unknown component group {0}")]
    UnknownComponentGroup(u8),

    #[error("malformed {group:?} component {index}: {reason}")]
    MalformedComponent {
        group: ComponentGroupKind,
        index: usize,
        reason: String,
    },

    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    #[error("failed to encode {what}: {message}")]
    Encode { what: String, message: String },
}

impl CodecError {
    pub fn decode(what: impl Into<String>, err: impl ToString) -> Self {
        Self::Decode {
            what: what.into(),
            message: err.to_string(),
        }
    }

    pub fn encode(what: impl Into<String>, err: impl ToString) -> Self {
        Self::Encode {
            what: what.into(),
            message: err.to_string(),
        }
    }
}
