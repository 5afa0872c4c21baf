use crate::config::ConfigError;
use crate::form::DiffError;
use crate::logging::LoggingError;
use crate::model::ValidationError;
use crate::storage::StorageError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage error occurred while persisting data.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The live form and its baseline no longer line up.
    #[error("Form error: {0}")]
    Diff(#[from] DiffError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Required fields were left empty.
    #[error("{0} required field(s) empty")]
    Incomplete(usize),

    /// The active tab cannot do what was asked.
    #[error("{0}")]
    Unavailable(&'static str),
}
