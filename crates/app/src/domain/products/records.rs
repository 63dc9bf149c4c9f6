//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,

    /// Unit price, up to four decimal places.
    pub price: Decimal,

    /// Sellable units. Never negative.
    pub stock_quantity: u32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
