//! Products Data

use rust_decimal::Decimal;

use crate::domain::{
    pricing::validate_price,
    products::{errors::ProductsServiceError, records::ProductUuid},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub stock_quantity: u32,
}

impl NewProduct {
    /// Trim the name and normalise the price, rejecting unusable values.
    pub(crate) fn validated(self) -> Result<Self, ProductsServiceError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(ProductsServiceError::InvalidName);
        }

        Ok(Self {
            name: name.to_string(),
            price: validate_price(self.price)?,
            ..self
        })
    }
}

/// Reject a restock of zero units.
pub(crate) fn validate_restock(quantity: u32) -> Result<u32, ProductsServiceError> {
    if quantity == 0 {
        return Err(ProductsServiceError::InvalidQuantity);
    }

    Ok(quantity)
}
