//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        auth::{AuthService, MemoryAuthService, PgAuthService},
        carts::{CartsService, MemoryCartsService, PgCartsService},
        checkout::{CheckoutConfig, CheckoutService, MemoryCheckoutService, PgCheckoutService},
        inventory::{InventoryService, MemoryInventoryService, PgInventoryService},
        orders::{MemoryOrdersService, OrdersService, PgOrdersService},
        products::{MemoryProductsService, PgProductsService, ProductsService},
    },
    memory::MemoryStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Every service the application exposes, behind trait objects so the storage
/// backend can be chosen at start-up.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub inventory: Arc<dyn InventoryService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(
        url: &str,
        checkout: CheckoutConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::postgres(Db::new(pool), checkout))
    }

    /// Build application context over an existing database handle.
    #[must_use]
    pub fn postgres(db: Db, checkout: CheckoutConfig) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            inventory: Arc::new(PgInventoryService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), checkout)),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.pool().clone())),
        }
    }

    /// Build application context over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(checkout: CheckoutConfig) -> Self {
        let store = MemoryStore::new();

        Self {
            products: Arc::new(MemoryProductsService::new(Arc::clone(&store))),
            inventory: Arc::new(MemoryInventoryService::new(Arc::clone(&store))),
            carts: Arc::new(MemoryCartsService::new(Arc::clone(&store))),
            checkout: Arc::new(MemoryCheckoutService::new(Arc::clone(&store), checkout)),
            orders: Arc::new(MemoryOrdersService::new(Arc::clone(&store))),
            auth: Arc::new(MemoryAuthService::new(store)),
        }
    }
}
