use crate::application::repositories::{RepositoryError, TransactionError};
use crate::domain::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A storage failure interrupted a multi-step edit and the store
    /// restored the state from before the edit
    #[error("Storage error, changes rolled back: {0}")]
    RolledBack(String),

    /// A multi-step edit failed and could not be rolled back; the page may
    /// need manual repair
    #[error("Inconsistent state after failed {operation}: {reason}")]
    InconsistentState { operation: String, reason: String },
}

impl EditError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            EditError::Validation(e) => e.code(),
            EditError::Unauthorized(_) => "unauthorized",
            EditError::NotFound(_) => "not_found",
            EditError::Storage(_) | EditError::RolledBack(_) => "storage_error",
            EditError::InconsistentState { .. } => "inconsistent_state",
        }
    }

    /// Map a transaction outcome for `operation` onto the service taxonomy.
    pub(crate) fn from_transaction(operation: &str, error: TransactionError<EditError>) -> Self {
        match error {
            TransactionError::Begin(e) => EditError::from(e),
            TransactionError::Aborted(EditError::Storage(msg)) => EditError::RolledBack(msg),
            TransactionError::Aborted(other) => other,
            TransactionError::Commit(e) => EditError::RolledBack(e.to_string()),
            TransactionError::RollbackFailed { cause, rollback } => EditError::InconsistentState {
                operation: operation.to_string(),
                reason: format!("{}; rollback failed: {}", cause, rollback),
            },
        }
    }
}

impl From<RepositoryError> for EditError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(msg) => EditError::NotFound(msg),
            RepositoryError::Storage(msg) => EditError::Storage(msg),
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
