//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use halalchain_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Unauthorized(_) => StatusError::unauthorized().brief(error.to_string()),
        CartsServiceError::InvalidQuantity => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::ProductNotFound | CartsServiceError::LineNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        CartsServiceError::InsufficientStock(ref shortfall) => {
            warn!(product = %shortfall.product_uuid, "cart change exceeds stock");

            StatusError::conflict().brief(error.to_string())
        }
        CartsServiceError::Pricing(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
