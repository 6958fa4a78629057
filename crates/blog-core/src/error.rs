//! Data-access error types.

use thiserror::Error;

/// Repository-level errors. Every variant is fatal to a session.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// What made a transactional write fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// A storage constraint rejected the row (e.g. unknown foreign key).
    Constraint,
    /// The transport failed while opening, running or finishing the transaction.
    Connection,
    /// The statement did not finish within the transaction timeout.
    Timeout,
    /// Any other statement failure.
    Statement,
}

/// A failed transactional write. The caller reports it and carries on.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct WriteError {
    pub kind: WriteFailure,
    pub reason: String,
    /// False when the transaction was never opened or the rollback itself failed.
    pub rolled_back: bool,
}

impl WriteError {
    pub fn new(kind: WriteFailure, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            rolled_back: false,
        }
    }

    pub fn rolled_back(mut self, rolled_back: bool) -> Self {
        self.rolled_back = rolled_back;
        self
    }

    /// Whether the same write could succeed if attempted again.
    ///
    /// Only classifies the failure; nothing in this crate retries.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, WriteFailure::Connection | WriteFailure::Timeout)
    }
}
