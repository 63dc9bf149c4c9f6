//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use halalchain_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        ProductsServiceError::AlreadyExists => StatusError::conflict().brief(error.to_string()),
        ProductsServiceError::InvalidName
        | ProductsServiceError::InvalidPrice(_)
        | ProductsServiceError::InvalidQuantity
        | ProductsServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        ProductsServiceError::Sql(source) => {
            error!("failed to load product: {source}");

            StatusError::internal_server_error()
        }
    }
}
