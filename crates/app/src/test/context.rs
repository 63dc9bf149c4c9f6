//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        auth::PgAuthService,
        carts::PgCartsService,
        checkout::{CheckoutConfig, PgCheckoutService},
        inventory::PgInventoryService,
        orders::PgOrdersService,
        products::PgProductsService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub inventory: PgInventoryService,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_checkout_config(CheckoutConfig::default()).await
    }

    pub async fn with_checkout_config(config: CheckoutConfig) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            inventory: PgInventoryService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone(), config),
            orders: PgOrdersService::new(db),
            auth: PgAuthService::new(test_db.pool().clone()),
            db: test_db,
        }
    }
}
