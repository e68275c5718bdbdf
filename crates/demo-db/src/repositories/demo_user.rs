//! PostgreSQL implementation of DemoUserRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use demo_core::{DemoUser, DemoUserRepository, NewDemoUser, RepoResult};

use crate::models::DemoUserModel;
use crate::pool::DbPool;

use super::error::{map_db_error, map_insert_error};

/// PostgreSQL implementation of DemoUserRepository
///
/// Every call checks one connection out of the pool for its duration, so
/// the pool's wait policy applies to each request.
#[derive(Clone)]
pub struct PgDemoUserRepository {
    pool: DbPool,
}

impl PgDemoUserRepository {
    /// Create a new PgDemoUserRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DemoUserRepository for PgDemoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewDemoUser) -> RepoResult<DemoUser> {
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO demo (username)
            VALUES ($1)
            RETURNING id
            ",
        )
        .bind(&user.username)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_insert_error(e, &user.username))?;

        debug!(id, "Inserted demo user");
        Ok(DemoUser::new(id, user.username.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<DemoUser>> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query_as::<_, DemoUserModel>(
            r"
            SELECT id, username
            FROM demo
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DemoUser::from))
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
