//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use halalchain_app::domain::checkout::{CheckoutFailure, CheckoutServiceError};

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::Unauthorized(_) => {
            StatusError::unauthorized().brief(error.to_string())
        }
        CheckoutServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        CheckoutServiceError::ProductNotFound => StatusError::not_found().brief(error.to_string()),
        CheckoutServiceError::InsufficientStock(_) => {
            StatusError::conflict().brief(error.to_string())
        }
        CheckoutServiceError::Failed(ref failure) => {
            match failure {
                CheckoutFailure::Storage(source) => error!("checkout storage error: {source}"),
                CheckoutFailure::Pricing(source) => error!("checkout pricing error: {source}"),
                CheckoutFailure::TimedOut | CheckoutFailure::Contention(_) => {
                    warn!("checkout gave up: {failure}");
                }
            }

            StatusError::service_unavailable().brief(error.to_string())
        }
    }
}
