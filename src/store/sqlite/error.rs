//! Maps SQLite failures onto `RepositoryError`.

use crate::store::RepositoryError;

/// Maps a `tokio_rusqlite` error for the entity identified by `id`.
///
/// UNIQUE and PRIMARY KEY violations become `AlreadyExists`; a closed
/// connection becomes `ConnectionFailed`; anything else is `QueryFailed`.
pub fn map_sqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, _))
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.into(),
            }
        }
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn constraint(extended_code: i32) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_unique_violation_is_already_exists() {
        let result = map_sqlite_error(constraint(ffi::SQLITE_CONSTRAINT_UNIQUE), "Restaurant", "Cafe X");

        assert_eq!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: "Cafe X".to_string(),
            }
        );
    }

    #[test]
    fn test_other_failures_are_query_failed() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_sqlite_error(err, "Review", "abc");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
