//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::users::Unauthorized;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("order not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
