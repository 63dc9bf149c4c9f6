//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    auth::{
        ApiTokenVersion,
        models::{ActiveApiToken, ApiTokenMetadata, ApiTokenUuid, NewApiToken},
    },
    users::UserUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const LIST_API_TOKENS_BY_USER_SQL: &str = include_str!("sql/list_api_tokens_by_user.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const TOUCH_API_TOKEN_LAST_USED_SQL: &str = include_str!("sql/touch_api_token_last_used.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.user_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list_api_tokens_by_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    /// Revoke an active token, returning it if it was active.
    pub(crate) async fn revoke_api_token(
        &self,
        token: ApiTokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_active_api_token_by_uuid(
        &self,
        token: ApiTokenUuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token_last_used(
        &self,
        token: ApiTokenUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_LAST_USED_SQL)
            .bind(token.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn try_get_version(row: &PgRow) -> sqlx::Result<ApiTokenVersion> {
    ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: try_get_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: try_get_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
