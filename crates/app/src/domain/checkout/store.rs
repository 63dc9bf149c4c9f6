//! Checkout stores: one atomic attempt against a storage backend.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use smallvec::SmallVec;
use tokio::time::timeout;

use crate::{
    database::Db,
    domain::{
        carts::repositories::PgCartLinesRepository,
        checkout::{
            errors::CheckoutServiceError,
            plan::{CheckoutPhase, CheckoutTrace, plan_checkout},
        },
        inventory::ledger::PgInventoryLedger,
        orders::{records::OrderRecord, repository::PgOrdersRepository},
        products::records::ProductUuid,
        users::UserUuid,
    },
};

/// A backend able to run one checkout attempt atomically.
///
/// An `Err` must mean nothing was written.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    async fn attempt(
        &self,
        user: UserUuid,
        bound: Duration,
        trace: &mut CheckoutTrace,
    ) -> Result<OrderRecord, CheckoutServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgCheckoutStore {
    db: Db,
    lines_repository: PgCartLinesRepository,
    orders_repository: PgOrdersRepository,
    ledger: PgInventoryLedger,
}

impl PgCheckoutStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines_repository: PgCartLinesRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            ledger: PgInventoryLedger::new(),
        }
    }
}

#[async_trait]
impl CheckoutStore for PgCheckoutStore {
    async fn attempt(
        &self,
        user: UserUuid,
        bound: Duration,
        trace: &mut CheckoutTrace,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        // Dropping the transaction on the deadline rolls it back.
        timeout(bound, self.run(user, bound, trace)).await?
    }
}

impl PgCheckoutStore {
    async fn run(
        &self,
        user: UserUuid,
        bound: Duration,
        trace: &mut CheckoutTrace,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let mut tx = self.db.begin_bounded(bound).await?;

        let lines = self.lines_repository.lock_lines(&mut tx, user).await?;

        // Lock stock rows in key order so concurrent checkouts cannot deadlock.
        let mut products: SmallVec<[ProductUuid; 8]> =
            lines.iter().map(|l| l.product_uuid).collect();

        products.sort_unstable();
        products.dedup();

        let levels = self.ledger.lock_stock_levels(&mut tx, &products).await?;

        let order = plan_checkout(user, &lines, &levels, Timestamp::now())?;

        trace.advance(CheckoutPhase::Reserving);

        for item in &order.items {
            self.ledger
                .reserve_and_decrement(&mut tx, item.product_uuid, item.quantity)
                .await?;
        }

        trace.advance(CheckoutPhase::Committing);

        let order = self.orders_repository.create_order(&mut tx, order).await?;

        self.lines_repository.clear_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(order)
    }
}
