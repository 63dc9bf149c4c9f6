//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        checkout::{
            config::CheckoutConfig,
            errors::CheckoutServiceError,
            memory::MemoryCheckoutStore,
            plan::CheckoutTrace,
            store::{CheckoutStore, PgCheckoutStore},
        },
        orders::records::OrderRecord,
        users::{UserUuid, authenticated},
    },
    memory::MemoryStore,
};

/// Automatic retries allowed after a transient failure.
const TRANSIENT_RETRIES: u32 = 1;

/// Drives checkout attempts against a [`CheckoutStore`], retrying once when an
/// attempt fails for a transient reason.
#[derive(Debug, Clone)]
pub struct CheckoutOrchestrator<S> {
    store: S,
    config: CheckoutConfig,
}

pub type PgCheckoutService = CheckoutOrchestrator<PgCheckoutStore>;

pub type MemoryCheckoutService = CheckoutOrchestrator<MemoryCheckoutStore>;

impl<S: CheckoutStore> CheckoutOrchestrator<S> {
    #[must_use]
    pub fn with_store(store: S, config: CheckoutConfig) -> Self {
        Self { store, config }
    }
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, config: CheckoutConfig) -> Self {
        Self::with_store(PgCheckoutStore::new(db), config)
    }
}

impl MemoryCheckoutService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, config: CheckoutConfig) -> Self {
        Self::with_store(MemoryCheckoutStore::new(store), config)
    }
}

#[async_trait]
impl<S: CheckoutStore> CheckoutService for CheckoutOrchestrator<S> {
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CheckoutServiceError> {
        let user = authenticated(user)?;

        let retries = if self.config.retry_transient {
            TRANSIENT_RETRIES
        } else {
            0
        };

        let mut attempt = 1;

        loop {
            let mut trace = CheckoutTrace::start(user, attempt);

            match self.store.attempt(user, self.config.timeout, &mut trace).await {
                Ok(order) => {
                    trace.done(&order);

                    return Ok(order);
                }
                Err(error) => {
                    trace.failed(&error);

                    if !error.is_transient() || attempt > retries {
                        return Err(error);
                    }

                    warn!(%user, attempt, "retrying checkout after transient failure");

                    attempt += 1;
                }
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the user's cart into a pending order, decrementing stock and clearing
    /// the cart, or fail without changing anything.
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CheckoutServiceError>;
}
