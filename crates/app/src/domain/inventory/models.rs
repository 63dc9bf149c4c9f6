//! Inventory Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductRecord, ProductUuid};

/// Stock reading for a single product, taken at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub available: u32,
}

impl StockLevel {
    /// Compare a requested quantity against this reading.
    ///
    /// # Errors
    ///
    /// Returns the shortfall when `requested` exceeds what is available.
    pub fn ensure_covers(&self, requested: u32) -> Result<(), StockShortfall> {
        if requested > self.available {
            return Err(StockShortfall {
                product_uuid: self.product_uuid,
                name: self.name.clone(),
                requested,
                available: self.available,
            });
        }

        Ok(())
    }
}

impl From<&ProductRecord> for StockLevel {
    fn from(product: &ProductRecord) -> Self {
        Self {
            product_uuid: product.uuid,
            name: product.name.clone(),
            price: product.price,
            available: product.stock_quantity,
        }
    }
}

/// A request that asked for more than the ledger holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

impl Display for StockShortfall {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "only {} of \"{}\" in stock, {} requested",
            self.available, self.name, self.requested
        )
    }
}
