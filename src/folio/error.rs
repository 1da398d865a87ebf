use thiserror::Error;

/// The step of a publish that failed. Reported inside [`FolioError::Sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    BranchLookup,
    BaseCommit,
    BlobCreation,
    TreeCreation,
    CommitCreation,
    RefUpdate,
}

impl std::fmt::Display for SyncStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SyncStep::BranchLookup => "branch lookup",
            SyncStep::BaseCommit => "base commit lookup",
            SyncStep::BlobCreation => "blob creation",
            SyncStep::TreeCreation => "tree creation",
            SyncStep::CommitCreation => "commit creation",
            SyncStep::RefUpdate => "ref update",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Publish failed during {step}: {message}")]
    Sync { step: SyncStep, message: String },

    #[error("Api Error: {0}")]
    Api(String),
}

impl FolioError {
    pub fn sync(step: SyncStep, message: impl Into<String>) -> Self {
        FolioError::Sync {
            step,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
