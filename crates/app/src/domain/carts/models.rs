//! Cart Models

use rust_decimal::Decimal;

use crate::domain::{
    carts::records::{CartLineRecord, CartLineUuid},
    inventory::StockLevel,
    pricing::{PriceError, line_total, sum_totals},
    products::records::ProductUuid,
    users::UserUuid,
};

/// A cart line joined with the live product it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub line_uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,

    /// Stock on hand when the cart was read. Advisory only.
    pub available: u32,

    pub line_total: Decimal,
}

impl CartItem {
    pub(crate) fn new(
        line_uuid: CartLineUuid,
        quantity: u32,
        level: StockLevel,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            line_uuid,
            line_total: line_total(level.price, quantity)?,
            product_uuid: level.product_uuid,
            name: level.name,
            unit_price: level.price,
            quantity,
            available: level.available,
        })
    }
}

/// A user's cart, recomputed from live product data on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub items: Vec<CartItem>,

    /// Sum of every line's quantity.
    pub item_count: u32,

    /// Sum of the rounded line totals.
    pub total: Decimal,
}

impl Cart {
    pub(crate) fn from_items(user_uuid: UserUuid, items: Vec<CartItem>) -> Result<Self, PriceError> {
        let total = sum_totals(items.iter().map(|item| item.line_total))?;
        let item_count = items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity));

        Ok(Self {
            user_uuid,
            items,
            item_count,
            total,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of setting a line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLineUpdate {
    Updated(CartLineRecord),

    /// A quantity of zero or less removed the line.
    Removed,
}
