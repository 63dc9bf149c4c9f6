//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearCartResponse {
    /// Number of lines removed
    pub removed: u64,
}

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "cart.clear", skip(depot), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClearCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let removed = state
        .app
        .carts
        .clear_cart(user)
        .await
        .map_err(into_status_error)?;

    tracing::info!(removed, "cleared cart");

    Ok(Json(ClearCartResponse { removed }))
}
