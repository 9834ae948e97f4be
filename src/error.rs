//! Error types.
//!
//! Every error here is recoverable at the call site: a failed create only
//! skips that entity, a failed asset load leaves the entity untouched.

use std::path::PathBuf;

/// Which registry an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Sequence,
    RoundSequence,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence => f.write_str("sequence"),
            Self::RoundSequence => f.write_str("round sequence"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SequenceError {
    #[error("{kind} with ID {id} already exists")]
    DuplicateId { kind: EntityKind, id: i32 },
    #[error("maximum {kind} limit reached ({limit})")]
    CapacityExceeded { kind: EntityKind, limit: usize },
    #[error("{kind} '{key}' not found")]
    NotFound { kind: EntityKind, key: String },
    #[error("failed to load image '{}': {reason}", path.display())]
    DecodeFailed { path: PathBuf, reason: String },
    #[error("failed to create texture: {0}")]
    UploadFailed(String),
    #[error("failed to load font '{}': {reason}", path.display())]
    FontLoadFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, SequenceError>;

impl SequenceError {
    pub(crate) fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}
