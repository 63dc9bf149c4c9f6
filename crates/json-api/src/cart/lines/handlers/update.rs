//! Update Cart Line Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::carts::models::CartLineUpdate;

use crate::{
    cart::{errors::into_status_error, lines::CartLineResponse},
    extensions::*,
    state::State,
};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// New quantity for the line; zero or less removes it
    pub quantity: i64,
}

/// Update Cart Line Handler
///
/// Overwrites a line's quantity. Responds `204 No Content` when the new
/// quantity removed the line.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart line updated"),
        (status_code = StatusCode::NO_CONTENT, description = "Cart line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.lines.update",
    skip(line, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        line_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let line = line.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("line_uuid", tracing::field::display(line));

    let update = state
        .app
        .carts
        .set_quantity(user, line.into(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    match update {
        CartLineUpdate::Updated(record) => {
            res.render(Json(CartLineResponse::from(record)));

            Ok(StatusCode::OK)
        }
        CartLineUpdate::Removed => {
            tracing::info!(line_uuid = %line, "removed cart line");

            Ok(StatusCode::NO_CONTENT)
        }
    }
}
