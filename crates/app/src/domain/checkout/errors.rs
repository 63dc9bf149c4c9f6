//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::domain::{
    inventory::{InventoryError, StockShortfall},
    pricing::PriceError,
    users::Unauthorized,
};

/// Postgres error codes for failures that leave nothing behind and may succeed
/// on a second try: `lock_not_available`, `deadlock_detected`,
/// `serialization_failure` and `query_canceled` (statement timeout).
const TRANSIENT_SQLSTATES: [&str; 4] = ["55P03", "40P01", "40001", "57014"];

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),

    #[error("cart is empty")]
    EmptyCart,

    #[error("product not found")]
    ProductNotFound,

    #[error("insufficient stock: {0}")]
    InsufficientStock(StockShortfall),

    #[error("checkout failed: {0}")]
    Failed(#[from] CheckoutFailure),
}

impl CheckoutServiceError {
    /// Whether the attempt failed for a reason a retry could clear.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Failed(failure) if failure.is_transient())
    }
}

/// Why a checkout that passed validation still could not commit.
#[derive(Debug, Error)]
pub enum CheckoutFailure {
    #[error("timed out waiting for stock")]
    TimedOut,

    #[error("stock is busy, please try again")]
    Contention(#[source] Error),

    #[error("order total cannot be computed")]
    Pricing(#[source] PriceError),

    #[error("storage error")]
    Storage(#[source] Error),
}

impl CheckoutFailure {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Contention(_))
    }
}

impl From<Error> for CheckoutFailure {
    fn from(error: Error) -> Self {
        let transient = error
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| TRANSIENT_SQLSTATES.contains(&code.as_ref()));

        if transient {
            Self::Contention(error)
        } else {
            Self::Storage(error)
        }
    }
}

impl From<Elapsed> for CheckoutFailure {
    fn from(_: Elapsed) -> Self {
        Self::TimedOut
    }
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        Self::Failed(error.into())
    }
}

impl From<Elapsed> for CheckoutServiceError {
    fn from(elapsed: Elapsed) -> Self {
        Self::Failed(elapsed.into())
    }
}

impl From<PriceError> for CheckoutServiceError {
    fn from(error: PriceError) -> Self {
        Self::Failed(CheckoutFailure::Pricing(error))
    }
}

impl From<StockShortfall> for CheckoutServiceError {
    fn from(shortfall: StockShortfall) -> Self {
        Self::InsufficientStock(shortfall)
    }
}

impl From<InventoryError> for CheckoutServiceError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::NotFound => Self::ProductNotFound,
            InventoryError::InsufficientStock(shortfall) => Self::InsufficientStock(shortfall),
            InventoryError::Sql(source) => source.into(),
        }
    }
}
