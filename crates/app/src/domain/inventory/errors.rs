//! Inventory errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::inventory::models::StockShortfall;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("product not found")]
    NotFound,

    #[error("insufficient stock: {0}")]
    InsufficientStock(StockShortfall),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InventoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

impl From<StockShortfall> for InventoryError {
    fn from(shortfall: StockShortfall) -> Self {
        Self::InsufficientStock(shortfall)
    }
}
