//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{auth::ApiTokenError, users::Unauthorized};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("token not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}
