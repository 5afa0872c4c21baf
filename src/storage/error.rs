use tokio_util::codec::LinesCodecError;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoding a forward message failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] LinesCodecError),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// No record with this id exists.
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// Another live or deleted account already uses this username.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// The record is soft-deleted and cannot take part in the operation.
    #[error("{kind} #{id} is deleted")]
    Deleted { kind: &'static str, id: u64 },

    /// Restore or hard delete was requested for a live record.
    #[error("{kind} #{id} is not deleted")]
    NotDeleted { kind: &'static str, id: u64 },

    /// The report was forwarded before.
    #[error("report #{0} was already forwarded")]
    AlreadyForwarded(u64),
}
