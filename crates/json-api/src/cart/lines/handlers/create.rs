//! Add Cart Line Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::carts::data::NewCartLine;

use crate::{
    cart::{errors::into_status_error, lines::CartLineResponse},
    extensions::*,
    state::State,
};

/// Add Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartLineRequest {
    /// Product to add
    pub product_uuid: Uuid,

    /// Units to add; merged with any existing line for the product
    pub quantity: i64,
}

impl From<AddCartLineRequest> for NewCartLine {
    fn from(request: AddCartLineRequest) -> Self {
        NewCartLine {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Line Handler
///
/// Adds units of a product to the caller's cart. Adding a product already in
/// the cart increases that line's quantity.
#[endpoint(
    tags("cart"),
    summary = "Add to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart line created or merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity must be at least 1"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.lines.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(request.product_uuid));

    let line = state
        .app
        .carts
        .add_line(user, request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/lines/{}", line.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Json(line.into()))
}
