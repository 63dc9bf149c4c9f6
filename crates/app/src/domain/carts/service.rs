//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartLine,
            errors::CartsServiceError,
            models::{Cart, CartItem, CartLineUpdate},
            records::{CartLineRecord, CartLineUuid},
            repositories::{PgCartItemsRepository, PgCartLinesRepository},
            rules::{self, QuantityChange},
        },
        inventory::{InventoryError, StockShortfall, ledger::PgInventoryLedger},
        users::{UserUuid, authenticated},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    lines_repository: PgCartLinesRepository,
    items_repository: PgCartItemsRepository,
    ledger: PgInventoryLedger,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines_repository: PgCartLinesRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            ledger: PgInventoryLedger::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let user = authenticated(user)?;
        let quantity = rules::requested_quantity(line.quantity)?;

        let mut tx = self.db.begin().await?;

        let level = self
            .ledger
            .get_stock_level(&mut tx, line.product_uuid)
            .await
            .map_err(InventoryError::from)?;

        let existing = self
            .lines_repository
            .find_line_for_product(&mut tx, user, line.product_uuid)
            .await?;

        if let Err(error) =
            rules::merged_quantity(existing.map(|l| l.quantity), quantity, &level)
        {
            warn!(%user, product = %line.product_uuid, quantity, %error, "cart line rejected");

            return Err(error);
        }

        // The existing row is locked, so the additive upsert lands on the merged quantity.
        let Some(record) = self
            .lines_repository
            .upsert_line(&mut tx, CartLineUuid::new(), user, line.product_uuid, quantity)
            .await?
        else {
            // A concurrent first add created the line; its merge no longer fits the stock.
            let level = self
                .ledger
                .get_stock_level(&mut tx, line.product_uuid)
                .await
                .map_err(InventoryError::from)?;

            let current = self
                .lines_repository
                .find_line_for_product(&mut tx, user, line.product_uuid)
                .await?;

            let existing = current.map_or(0, |l| l.quantity);

            let error = rules::merged_quantity(Some(existing), quantity, &level)
                .err()
                .unwrap_or_else(|| {
                    CartsServiceError::InsufficientStock(StockShortfall {
                        product_uuid: level.product_uuid,
                        name: level.name.clone(),
                        requested: existing.saturating_add(quantity),
                        available: level.available,
                    })
                });

            warn!(%user, product = %line.product_uuid, quantity, %error, "cart line rejected");

            return Err(error);
        };

        tx.commit().await?;

        info!(%user, line = %record.uuid, product = %record.product_uuid, quantity = record.quantity, "cart line added");

        Ok(record)
    }

    async fn set_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<CartLineUpdate, CartsServiceError> {
        let user = authenticated(user)?;
        let change = rules::quantity_change(quantity)?;

        let mut tx = self.db.begin().await?;

        let current = self.lines_repository.get_line(&mut tx, user, line).await?;

        let update = match change {
            QuantityChange::Remove => {
                self.lines_repository.delete_line(&mut tx, user, line).await?;

                CartLineUpdate::Removed
            }
            QuantityChange::Set(quantity) => {
                self.ledger
                    .get_stock_level(&mut tx, current.product_uuid)
                    .await
                    .map_err(InventoryError::from)?
                    .ensure_covers(quantity)?;

                let record = self
                    .lines_repository
                    .set_quantity(&mut tx, user, line, quantity)
                    .await?;

                CartLineUpdate::Updated(record)
            }
        };

        tx.commit().await?;

        info!(%user, %line, ?change, "cart line updated");

        Ok(update)
    }

    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let user = authenticated(user)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.lines_repository.delete_line(&mut tx, user, line).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        tx.commit().await?;

        info!(%user, %line, "cart line removed");

        Ok(())
    }

    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let user = authenticated(user)?;

        let mut tx = self.db.begin().await?;

        let rows = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        let items = rows
            .into_iter()
            .map(|row| CartItem::new(row.line_uuid, row.quantity, row.level))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::from_items(user, items)?)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let user = authenticated(user)?;

        let mut tx = self.db.begin().await?;

        let removed = self.lines_repository.clear_lines(&mut tx, user).await?;

        tx.commit().await?;

        info!(%user, removed, "cart cleared");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add `quantity` of a product to the user's cart, merging into an existing
    /// line for the same product. Stock is checked but not reserved.
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Overwrite a line's quantity. Zero or less removes the line.
    async fn set_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<CartLineUpdate, CartsServiceError>;

    /// Remove a line. Removing a line that is already gone is `LineNotFound`.
    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError>;

    /// The user's cart joined with live product data. Never fails for an empty cart.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Remove every line from the user's cart, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}
