use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns unique and foreign key violations into a `ConstraintViolation`
    /// carrying `context`, so callers can answer with a conflict instead of
    /// an internal error.
    pub fn into_constraint(self, context: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(format!("{} already exists", context))
        } else if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(format!("{} references an unknown record", context))
        } else {
            self
        }
    }
}
