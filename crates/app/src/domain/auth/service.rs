//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::domain::{
    auth::{
        ApiTokenMetadata, ApiTokenUuid, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        NewApiToken, format_api_token, generate_api_token_secret, parse_api_token,
        repository::PgAuthRepository, token_digest,
    },
    users::{UserUuid, authenticated},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }
}

/// Mint a token for `user`: the raw token for the caller, and what to store.
pub(crate) fn mint_api_token(user: UserUuid) -> (String, NewApiToken) {
    let uuid = ApiTokenUuid::new();
    let version = ApiTokenVersion::V1;
    let secret = generate_api_token_secret();

    let token = format_api_token(uuid, version, &secret);
    let token_hash = token_digest(uuid, version, user, &secret);

    (
        token,
        NewApiToken {
            uuid,
            user_uuid: user,
            version,
            token_hash,
        },
    )
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).or(Err(AuthServiceError::NotFound))?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let digest = token_digest(
            parsed_token.token_uuid,
            parsed_token.version,
            token.user_uuid,
            &parsed_token.secret,
        );

        if digest != token.token_hash {
            warn!(token = %parsed_token.token_uuid, "api token digest mismatch");

            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(token = %parsed_token.token_uuid, %error, "failed to record api token use");
        }

        Ok(token.user_uuid)
    }

    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let user = authenticated(user)?;
        let (token, new_token) = mint_api_token(user);

        let metadata = self.repository.create_api_token(&new_token).await?;

        info!(%user, token = %metadata.uuid, "api token issued");

        Ok(IssuedApiToken { token, metadata })
    }

    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        let user = authenticated(user)?;

        Ok(self.repository.list_api_tokens_by_user(user).await?)
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token).await?.is_some();

        if revoked {
            info!(%token, "api token revoked");
        }

        Ok(revoked)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Issue a new token for `user`. The raw token is only ever returned here.
    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;

    /// List every token issued to `user`, revoked ones included.
    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError>;

    /// Revoke a token. Returns `true` if the token was active.
    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError>;
}
