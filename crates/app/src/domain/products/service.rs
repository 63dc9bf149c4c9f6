//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pricing::validate_price,
        products::{
            data::{NewProduct, validate_restock},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.validated()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        info!(product = %created.uuid, stock = created.stock_quantity, "product created");

        Ok(created)
    }

    async fn update_price(
        &self,
        product: ProductUuid,
        price: Decimal,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = validate_price(price)?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_price(&mut tx, product, price).await?;

        tx.commit().await?;

        info!(product = %updated.uuid, price = %updated.price, "product repriced");

        Ok(updated)
    }

    async fn restock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let quantity = validate_restock(quantity)?;

        let mut tx = self.db.begin().await?;

        let restocked = self.repository.restock(&mut tx, product, quantity).await?;

        tx.commit().await?;

        info!(product = %restocked.uuid, added = quantity, stock = restocked.stock_quantity, "product restocked");

        Ok(restocked)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve every product in the catalog.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Add a product to the catalog.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Change a product's unit price. Existing order items keep the price they were bought at.
    async fn update_price(
        &self,
        product: ProductUuid,
        price: Decimal,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Add `quantity` units to a product's stock.
    async fn restock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_product};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_record() -> TestResult {
        let ctx = TestContext::new().await;

        let product = create_product(&ctx.products, "Organic Honey 500g", dec!(9.95), 12).await?;

        assert_eq!(product.name, "Organic Honey 500g");
        assert_eq!(product.price, dec!(9.95));
        assert_eq!(product.stock_quantity, 12);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx.products, "Chickpeas", dec!(1.20), 3).await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: product.uuid,
                name: "Chickpeas again".to_string(),
                price: dec!(1.30),
                stock_quantity: 1,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_returns_all_products() -> TestResult {
        let ctx = TestContext::new().await;

        let a = create_product(&ctx.products, "Tahini", dec!(4.10), 1).await?;
        let b = create_product(&ctx.products, "Sumac", dec!(2.75), 2).await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, vec![a.uuid, b.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn update_price_reflects_new_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx.products, "Pistachios", dec!(6.00), 4).await?;

        let updated = ctx.products.update_price(product.uuid, dec!(6.4999)).await?;

        assert_eq!(updated.price, dec!(6.4999));

        Ok(())
    }

    #[tokio::test]
    async fn restock_adds_to_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx.products, "Couscous", dec!(2.10), 4).await?;

        let restocked = ctx.products.restock(product.uuid, 6).await?;

        assert_eq!(restocked.stock_quantity, 10);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
