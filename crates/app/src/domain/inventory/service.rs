//! Inventory service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        inventory::{errors::InventoryError, ledger::PgInventoryLedger},
        products::records::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    ledger: PgInventoryLedger,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            ledger: PgInventoryLedger::new(),
        }
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    async fn get_available(&self, product: ProductUuid) -> Result<u32, InventoryError> {
        let mut tx = self.db.begin().await?;

        let level = self.ledger.get_stock_level(&mut tx, product).await?;

        tx.commit().await?;

        Ok(level.available)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Current sellable stock for a product. This is a reading, not a reservation.
    async fn get_available(&self, product: ProductUuid) -> Result<u32, InventoryError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_product};

    use super::*;

    #[tokio::test]
    async fn get_available_returns_stock_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx.products, "Halal Lamb Chops", dec!(18.40), 7).await?;

        assert_eq!(ctx.inventory.get_available(product.uuid).await?, 7);

        Ok(())
    }

    #[tokio::test]
    async fn get_available_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.inventory.get_available(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(InventoryError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
