use nc_01_identity_space::IdentityError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure inside an editor. Always names the editor that failed.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("{editor}: {source}")]
    MappingNotFound {
        editor: String,
        #[source]
        source: IdentityError,
    },

    #[error("{editor}: malformed component: {reason}")]
    MalformedComponent { editor: String, reason: String },
}

impl EditorError {
    pub fn mapping(editor: &str, source: IdentityError) -> Self {
        Self::MappingNotFound {
            editor: editor.to_string(),
            source,
        }
    }

    pub fn malformed(editor: &str, reason: impl Into<String>) -> Self {
        Self::MalformedComponent {
            editor: editor.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the editor that failed.
    pub fn editor(&self) -> &str {
        match self {
            Self::MappingNotFound { editor, .. } | Self::MalformedComponent { editor, .. } => editor,
        }
    }
}

/// Failure to resolve the cordapps configured for a snapshot.
#[derive(Debug, Error)]
pub enum CordappError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed plugin manifest {}: {reason}", .path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    #[error("cordapp '{name}' listed in {} is not registered", .path.display())]
    UnknownCordapp { name: String, path: PathBuf },
}
