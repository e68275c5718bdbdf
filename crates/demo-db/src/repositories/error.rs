//! Error handling utilities for repositories

use demo_core::DomainError;
use sqlx::Error as SqlxError;
use tracing::warn;

use crate::schema::is_undefined_table;

/// SQLSTATE `string_data_right_truncation`
const STRING_TOO_LONG: &str = "22001";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_undefined_table(&e) {
        warn!("demo table is missing; was the schema bootstrapped?");
    }
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_db_error`], but a value too wide for the column is the caller's fault
pub fn map_insert_error(e: SqlxError, username: &str) -> DomainError {
    let too_long = e
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == STRING_TOO_LONG);

    if too_long {
        return DomainError::InvalidUsername(format!(
            "'{username}' does not fit the username column"
        ));
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_maps_to_database_error() {
        let err = map_insert_error(SqlxError::RowNotFound, "fred");
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
