use std::time::Duration;

use storefront_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A write was handed no entity; nothing was sent to the database.
    #[error("Entity can not be empty")]
    NilEntity,

    /// A row referenced by id, email or foreign key does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was rejected before any I/O (e.g. unknown sort property).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A statement inside a multi-statement transaction failed; the whole
    /// transaction was rolled back.
    #[error("Transaction rolled back: {0}")]
    Transaction(#[source] sqlx::Error),

    /// The operation did not finish within the configured deadline.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Wrap a failure raised while a transaction was open.
    pub(crate) fn in_transaction(err: sqlx::Error) -> Self {
        Self::Transaction(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(constraint) = unique_violation(&err) {
            return Self::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ));
        }
        Self::Database(err)
    }
}

/// Name of the violated constraint when `err` is a unique violation.
fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Some(db_err.constraint().unwrap_or("unknown").to_string())
        }
        _ => None,
    }
}
