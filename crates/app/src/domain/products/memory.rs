//! In-memory product catalog.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    domain::{
        pricing::validate_price,
        products::{
            ProductsService,
            data::{NewProduct, validate_restock},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
        },
    },
    memory::MemoryStore,
};

#[derive(Debug, Clone)]
pub struct MemoryProductsService {
    store: Arc<MemoryStore>,
}

impl MemoryProductsService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductsService for MemoryProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let state = self.store.lock().await;

        let mut products: Vec<ProductRecord> = state.products.values().cloned().collect();

        products.sort_by_key(|product| product.uuid);

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let state = self.store.lock().await;

        state
            .products
            .get(&product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.validated()?;
        let mut state = self.store.lock().await;

        if state.products.contains_key(&product.uuid) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let now = Timestamp::now();
        let created = ProductRecord {
            uuid: product.uuid,
            name: product.name,
            price: product.price,
            stock_quantity: product.stock_quantity,
            created_at: now,
            updated_at: now,
        };

        state.products.insert(created.uuid, created.clone());

        info!(product = %created.uuid, stock = created.stock_quantity, "product created");

        Ok(created)
    }

    async fn update_price(
        &self,
        product: ProductUuid,
        price: Decimal,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = validate_price(price)?;
        let mut state = self.store.lock().await;

        let record = state
            .products
            .get_mut(&product)
            .ok_or(ProductsServiceError::NotFound)?;

        record.price = price;
        record.updated_at = Timestamp::now();

        info!(product = %record.uuid, price = %record.price, "product repriced");

        Ok(record.clone())
    }

    async fn restock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let quantity = validate_restock(quantity)?;
        let mut state = self.store.lock().await;

        let record = state
            .products
            .get_mut(&product)
            .ok_or(ProductsServiceError::NotFound)?;

        record.stock_quantity = record
            .stock_quantity
            .checked_add(quantity)
            .filter(|stock| i32::try_from(*stock).is_ok())
            .ok_or(ProductsServiceError::InvalidData)?;
        record.updated_at = Timestamp::now();

        info!(product = %record.uuid, added = quantity, stock = record.stock_quantity, "product restocked");

        Ok(record.clone())
    }
}
