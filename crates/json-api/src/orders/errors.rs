//! Errors

use salvo::http::StatusError;
use tracing::error;

use halalchain_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Unauthorized(_) => StatusError::unauthorized().brief(error.to_string()),
        OrdersServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
