//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::carts::models::{Cart, CartItem};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The user the cart belongs to
    pub user_uuid: Uuid,

    /// The lines in the cart, priced at current catalog prices
    pub items: Vec<CartItemResponse>,

    /// Total units across every line
    pub item_count: u32,

    /// Sum of the line totals, as a decimal string
    pub total: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            user_uuid: cart.user_uuid.into(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            item_count: cart.item_count,
            total: cart.total.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The cart line this item was built from
    pub line_uuid: Uuid,

    /// The product in the line
    pub product_uuid: Uuid,

    /// Product display name
    pub name: String,

    /// Current unit price
    pub unit_price: String,

    /// Units in the line
    pub quantity: u32,

    /// Units currently in stock
    pub available: u32,

    /// `unit_price × quantity`, rounded to the cent
    pub line_total: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            line_uuid: item.line_uuid.into(),
            product_uuid: item.product_uuid.into(),
            name: item.name,
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            available: item.available,
            line_total: item.line_total.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart. A caller with no lines gets an empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
