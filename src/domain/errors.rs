//! Domain errors for the git-quest system.

use thiserror::Error;

/// Rejections of a user request. None of these mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("No quests available. Run \"scan quests\" first!")]
    NoScan,

    #[error("Invalid quest number. Choose between 1 and {max}.")]
    InvalidQuestNumber { max: usize },

    #[error("No active quest #{0}. Accept it first with \"accept quest {0}\".")]
    NotAccepted(u32),

    #[error("No verifier found for scanner: {0}")]
    UnknownScanner(String),

    #[error("Quest \"{0}\" is already completed!")]
    AlreadyCompleted(String),
}

/// Domain-level errors that can occur while running an operation.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error("State storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Concurrency conflict: {entity} {id} was modified")]
    ConcurrencyConflict { entity: String, id: String },

    #[error("Cannot read directory {path}: {reason}")]
    UnreadableDirectory { path: String, reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl DomainError {
    /// The user-facing rejection carried by this error, if any.
    pub fn as_rejection(&self) -> Option<&QuestError> {
        match self {
            Self::Quest(err) => Some(err),
            _ => None,
        }
    }
}
