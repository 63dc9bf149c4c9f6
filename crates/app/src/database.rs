//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow, query};

/// SQL used to bound how long a statement may wait on a row lock.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

/// SQL used to bound how long a single statement may run.
pub const SET_STATEMENT_TIMEOUT_SQL: &str = "SELECT set_config('statement_timeout', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a plain read-committed transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction whose lock waits and statements are bounded by `timeout`.
    ///
    /// Both settings are transaction-local, so they vanish on commit or rollback.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or applying the timeouts fails.
    pub async fn begin_bounded(
        &self,
        timeout: Duration,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let millis = format!("{}ms", timeout.as_millis().max(1));

        query(SET_LOCK_TIMEOUT_SQL)
            .bind(&millis)
            .execute(&mut *tx)
            .await?;

        query(SET_STATEMENT_TIMEOUT_SQL)
            .bind(&millis)
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative `INTEGER` column as a count.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count: i32 = row.try_get(col)?;

    u32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a count into the `INTEGER` representation used by the schema.
pub(crate) fn int_column(value: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
