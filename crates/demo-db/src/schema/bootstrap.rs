//! Startup reset of the demo table
//!
//! Drops the table (tolerating only "relation does not exist"), recreates it
//! and inserts the seed row, all in one server-side block inside a single
//! transaction. Runs once, before the server accepts requests.

use sqlx::Connection;
use tracing::{info, instrument};

use crate::error::DbError;
use crate::pool::DbPool;

/// Name of the demo table
pub const DEMO_TABLE: &str = "demo";

/// Username of the row present after every bootstrap
pub const SEED_USERNAME: &str = "chris";

/// SQLSTATE `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";

/// One round trip. The inner block handles `undefined_table` and nothing
/// else, so every other DROP failure aborts the whole block.
const BOOTSTRAP_SQL: &str = r"
DO $bootstrap$
BEGIN
    BEGIN
        EXECUTE 'DROP TABLE demo';
    EXCEPTION
        WHEN undefined_table THEN
            NULL;
    END;

    EXECUTE 'CREATE TABLE demo (
        id       BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        username VARCHAR(40) NOT NULL
    )';

    EXECUTE 'INSERT INTO demo (username) VALUES (''chris'')';
END
$bootstrap$
";

/// Reset the demo table to its seed state
///
/// Not safe for concurrent callers.
#[instrument(skip(pool))]
pub async fn bootstrap(pool: &DbPool) -> Result<(), DbError> {
    info!(table = DEMO_TABLE, "Bootstrapping schema");

    let mut conn = pool.acquire().await?;
    let mut tx = conn.begin().await.map_err(DbError::Bootstrap)?;

    sqlx::raw_sql(BOOTSTRAP_SQL)
        .execute(&mut *tx)
        .await
        .map_err(DbError::Bootstrap)?;

    tx.commit().await.map_err(DbError::Bootstrap)?;

    info!(table = DEMO_TABLE, seed = SEED_USERNAME, "Schema bootstrap complete");
    Ok(())
}

/// True when the error is PostgreSQL's "relation does not exist"
pub fn is_undefined_table(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNDEFINED_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use demo_core::USERNAME_MAX_LEN;

    #[test]
    fn test_drop_swallows_only_undefined_table() {
        assert!(BOOTSTRAP_SQL.contains("WHEN undefined_table THEN"));
        assert_eq!(BOOTSTRAP_SQL.matches("WHEN ").count(), 1);
        assert!(!BOOTSTRAP_SQL.to_uppercase().contains("WHEN OTHERS"));
    }

    #[test]
    fn test_statement_order() {
        let drop = BOOTSTRAP_SQL.find("DROP TABLE").unwrap();
        let create = BOOTSTRAP_SQL.find("CREATE TABLE").unwrap();
        let insert = BOOTSTRAP_SQL.find("INSERT INTO").unwrap();
        assert!(drop < create && create < insert);
    }

    #[test]
    fn test_table_shape_matches_domain() {
        assert!(BOOTSTRAP_SQL.contains(&format!("CREATE TABLE {DEMO_TABLE} (")));
        assert!(BOOTSTRAP_SQL.contains(&format!("VARCHAR({USERNAME_MAX_LEN})")));
        assert!(BOOTSTRAP_SQL.contains("GENERATED BY DEFAULT AS IDENTITY"));
        assert!(BOOTSTRAP_SQL.contains(&format!("VALUES (''{SEED_USERNAME}'')")));
    }

    #[test]
    fn test_non_database_errors_are_not_undefined_table() {
        assert!(!is_undefined_table(&sqlx::Error::RowNotFound));
        assert!(!is_undefined_table(&sqlx::Error::PoolTimedOut));
    }
}
