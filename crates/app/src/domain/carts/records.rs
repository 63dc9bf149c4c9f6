//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// One `(user, product)` intent in a cart. A user holds at most one line per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
