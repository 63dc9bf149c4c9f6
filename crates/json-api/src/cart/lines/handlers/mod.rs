//! Cart Line Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::carts::records::CartLineRecord;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod update;

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The product in the line
    pub product_uuid: Uuid,

    /// Units in the line after the change
    pub quantity: u32,

    /// The date and time the line was created
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}
