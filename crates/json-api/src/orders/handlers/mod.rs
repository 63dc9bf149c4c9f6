//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::orders::records::{OrderItemRecord, OrderRecord};

pub(crate) mod get;
pub(crate) mod index;

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Fulfilment status
    pub status: String,

    /// Sum of the item line totals, as a decimal string
    pub subtotal: String,

    /// The items, priced as they were at checkout
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            status: order.status.to_string(),
            subtotal: order.subtotal.to_string(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The product bought
    pub product_uuid: Uuid,

    /// Units bought
    pub quantity: u32,

    /// Unit price at the moment of checkout
    pub price_at_purchase: String,

    /// `price_at_purchase × quantity`, rounded to the cent
    pub line_total: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase.to_string(),
            line_total: item.line_total.to_string(),
        }
    }
}
