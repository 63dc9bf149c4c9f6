//! In-memory inventory ledger.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::{
    domain::{
        inventory::{InventoryError, InventoryService, StockLevel},
        products::records::{ProductRecord, ProductUuid},
    },
    memory::MemoryStore,
};

#[derive(Debug, Clone)]
pub struct MemoryInventoryService {
    store: Arc<MemoryStore>,
}

impl MemoryInventoryService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl InventoryService for MemoryInventoryService {
    async fn get_available(&self, product: ProductUuid) -> Result<u32, InventoryError> {
        let state = self.store.lock().await;

        stock_level(&state.products, product).map(|level| level.available)
    }
}

pub(crate) fn stock_level(
    products: &FxHashMap<ProductUuid, ProductRecord>,
    product: ProductUuid,
) -> Result<StockLevel, InventoryError> {
    products
        .get(&product)
        .map(StockLevel::from)
        .ok_or(InventoryError::NotFound)
}

/// Take `quantity` units out of `product`, leaving it untouched on failure.
///
/// Returns the stock remaining after the decrement.
pub(crate) fn reserve_and_decrement(
    products: &mut FxHashMap<ProductUuid, ProductRecord>,
    product: ProductUuid,
    quantity: u32,
) -> Result<u32, InventoryError> {
    let record = products.get_mut(&product).ok_or(InventoryError::NotFound)?;

    StockLevel::from(&*record).ensure_covers(quantity)?;

    record.stock_quantity -= quantity;
    record.updated_at = jiff::Timestamp::now();

    Ok(record.stock_quantity)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::test::helpers::make_product;

    use super::*;

    #[test]
    fn decrement_reduces_stock() -> TestResult {
        let product = make_product("Zamzam Water 5L", dec!(4.99), 5);
        let uuid = product.uuid;
        let mut products = FxHashMap::from_iter([(uuid, product)]);

        assert_eq!(reserve_and_decrement(&mut products, uuid, 3)?, 2);
        assert_eq!(products.get(&uuid).map(|p| p.stock_quantity), Some(2));

        Ok(())
    }

    #[test]
    fn decrement_past_zero_is_rejected_and_leaves_stock_alone() {
        let product = make_product("Zamzam Water 5L", dec!(4.99), 2);
        let uuid = product.uuid;
        let mut products = FxHashMap::from_iter([(uuid, product)]);

        let result = reserve_and_decrement(&mut products, uuid, 3);

        assert!(
            matches!(
                result,
                Err(InventoryError::InsufficientStock(ref s)) if s.available == 2 && s.requested == 3
            ),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(products.get(&uuid).map(|p| p.stock_quantity), Some(2));
    }

    #[test]
    fn decrement_unknown_product_is_not_found() {
        let mut products = FxHashMap::default();

        let result = reserve_and_decrement(&mut products, ProductUuid::new(), 1);

        assert!(matches!(result, Err(InventoryError::NotFound)));
    }

    #[tokio::test]
    async fn get_available_reads_current_stock() -> TestResult {
        let store = MemoryStore::new();
        let product = make_product("Saffron 2g", dec!(7.25), 9);
        let uuid = product.uuid;

        store.lock().await.products.insert(uuid, product);

        let service = MemoryInventoryService::new(store);

        assert_eq!(service.get_available(uuid).await?, 9);

        Ok(())
    }

    #[tokio::test]
    async fn get_available_unknown_product_is_not_found() {
        let service = MemoryInventoryService::new(MemoryStore::new());

        let result = service.get_available(ProductUuid::new()).await;

        assert!(matches!(result, Err(InventoryError::NotFound)));
    }
}
