//! In-memory API tokens.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tracing::info;

use crate::{
    domain::{
        auth::{
            ApiTokenMetadata, ApiTokenUuid, AuthService, AuthServiceError, IssuedApiToken,
            parse_api_token, service::mint_api_token, token_digest,
        },
        users::{UserUuid, authenticated},
    },
    memory::MemoryStore,
};

/// A token as held by the in-memory store: metadata plus its digest.
#[derive(Debug, Clone)]
pub(crate) struct StoredApiToken {
    pub(crate) metadata: ApiTokenMetadata,
    pub(crate) token_hash: String,
}

#[derive(Debug, Clone)]
pub struct MemoryAuthService {
    store: Arc<MemoryStore>,
}

impl MemoryAuthService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for MemoryAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).or(Err(AuthServiceError::NotFound))?;

        let mut state = self.store.lock().await;

        let stored = state
            .api_tokens
            .iter_mut()
            .find(|t| {
                t.metadata.uuid == parsed_token.token_uuid
                    && t.metadata.version == parsed_token.version
                    && t.metadata.revoked_at.is_none()
            })
            .ok_or(AuthServiceError::NotFound)?;

        let digest = token_digest(
            parsed_token.token_uuid,
            parsed_token.version,
            stored.metadata.user_uuid,
            &parsed_token.secret,
        );

        if digest != stored.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        stored.metadata.last_used_at = Some(Timestamp::now());

        Ok(stored.metadata.user_uuid)
    }

    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let user = authenticated(user)?;
        let (token, new_token) = mint_api_token(user);

        let metadata = ApiTokenMetadata {
            uuid: new_token.uuid,
            user_uuid: new_token.user_uuid,
            version: new_token.version,
            created_at: Timestamp::now(),
            last_used_at: None,
            revoked_at: None,
        };

        self.store.lock().await.api_tokens.push(StoredApiToken {
            metadata: metadata.clone(),
            token_hash: new_token.token_hash,
        });

        info!(%user, token = %metadata.uuid, "api token issued");

        Ok(IssuedApiToken { token, metadata })
    }

    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        let user = authenticated(user)?;

        let state = self.store.lock().await;

        Ok(state
            .api_tokens
            .iter()
            .filter(|t| t.metadata.user_uuid == user)
            .map(|t| t.metadata.clone())
            .collect())
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let mut state = self.store.lock().await;

        let Some(stored) = state
            .api_tokens
            .iter_mut()
            .find(|t| t.metadata.uuid == token && t.metadata.revoked_at.is_none())
        else {
            return Ok(false);
        };

        stored.metadata.revoked_at = Some(Timestamp::now());

        info!(%token, "api token revoked");

        Ok(true)
    }
}
