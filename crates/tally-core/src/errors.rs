use thiserror::Error;

/// Store-level failures. Every operation aborts on the first error and rolls
/// back only its own transaction; nothing here is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch already exists: {0}")]
    DuplicateBranch(String),

    #[error("invalid outcome {0:?} (expected Passed, Failed or Timeout)")]
    InvalidOutcome(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[source] rusqlite::Error),

    #[error("transaction failed: {0}")]
    TransactionFailed(#[source] rusqlite::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(pub String);
