//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    inventory::{InventoryError, StockShortfall},
    pricing::PriceError,
    users::Unauthorized,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("quantity must be a whole number of at least 1")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("cart line not found")]
    LineNotFound,

    #[error("insufficient stock: {0}")]
    InsufficientStock(StockShortfall),

    #[error("cart total cannot be computed: {0}")]
    Pricing(#[from] PriceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<StockShortfall> for CartsServiceError {
    fn from(shortfall: StockShortfall) -> Self {
        Self::InsufficientStock(shortfall)
    }
}

impl From<InventoryError> for CartsServiceError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::NotFound => Self::ProductNotFound,
            InventoryError::InsufficientStock(shortfall) => Self::InsufficientStock(shortfall),
            InventoryError::Sql(source) => Self::Sql(source),
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::LineNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
