//! Storage-specific error type wrapping sqlx errors.

use portal_domain::error::PortalError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored id does not fit the domain's 32-bit identifier.
    #[error("stored user id {0} is out of range")]
    IdOutOfRange(i64),

    /// The id sequence has passed the largest 32-bit id; nothing was stored.
    #[error("no user id left to assign")]
    IdsExhausted,
}

impl StorageError {
    /// Classify a failed insert, separating id-range `CHECK` violations from
    /// other database errors.
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_check_violation() => Self::IdsExhausted,
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for PortalError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_into_portal_storage_error() {
        let err: PortalError = StorageError::IdOutOfRange(i64::MAX).into();
        assert!(matches!(err, PortalError::Storage(_)));
        assert_eq!(
            err.to_string(),
            format!("stored user id {} is out of range", i64::MAX)
        );
    }

    #[test]
    fn should_include_sqlx_detail_in_message() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("database error: "));
    }
}
