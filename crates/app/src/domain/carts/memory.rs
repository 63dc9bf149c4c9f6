//! In-memory carts.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    domain::{
        carts::{
            CartsService,
            data::NewCartLine,
            errors::CartsServiceError,
            models::{Cart, CartItem, CartLineUpdate},
            records::{CartLineRecord, CartLineUuid},
            rules::{self, QuantityChange},
        },
        inventory::memory::stock_level,
        products::records::{ProductRecord, ProductUuid},
        users::{UserUuid, authenticated},
    },
    memory::MemoryStore,
};

#[derive(Debug, Clone)]
pub struct MemoryCartsService {
    store: Arc<MemoryStore>,
}

impl MemoryCartsService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

/// Build the user's cart from stored lines and the current catalog.
pub(crate) fn build_cart(
    user: UserUuid,
    lines: &[CartLineRecord],
    products: &FxHashMap<ProductUuid, ProductRecord>,
) -> Result<Cart, CartsServiceError> {
    let items = lines
        .iter()
        .filter(|line| line.user_uuid == user)
        .map(|line| {
            let level = stock_level(products, line.product_uuid)?;

            Ok(CartItem::new(line.uuid, line.quantity, level)?)
        })
        .collect::<Result<Vec<_>, CartsServiceError>>()?;

    Ok(Cart::from_items(user, items)?)
}

#[async_trait]
impl CartsService for MemoryCartsService {
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let user = authenticated(user)?;
        let quantity = rules::requested_quantity(line.quantity)?;

        let mut state = self.store.lock().await;

        let level = stock_level(&state.products, line.product_uuid)?;

        let existing = state
            .cart_lines
            .iter_mut()
            .find(|l| l.user_uuid == user && l.product_uuid == line.product_uuid);

        let merged = match rules::merged_quantity(existing.as_ref().map(|l| l.quantity), quantity, &level) {
            Ok(merged) => merged,
            Err(error) => {
                warn!(%user, product = %line.product_uuid, quantity, %error, "cart line rejected");

                return Err(error);
            }
        };

        let now = Timestamp::now();

        let record = if let Some(existing) = existing {
            existing.quantity = merged;
            existing.updated_at = now;

            existing.clone()
        } else {
            let record = CartLineRecord {
                uuid: CartLineUuid::new(),
                user_uuid: user,
                product_uuid: line.product_uuid,
                quantity: merged,
                created_at: now,
                updated_at: now,
            };

            state.cart_lines.push(record.clone());

            record
        };

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

        let mut state = self.store.lock().await;

        let position = state
            .cart_lines
            .iter()
            .position(|l| l.uuid == line && l.user_uuid == user)
            .ok_or(CartsServiceError::LineNotFound)?;

        let update = match change {
            QuantityChange::Remove => {
                state.cart_lines.remove(position);

                CartLineUpdate::Removed
            }
            QuantityChange::Set(quantity) => {
                let product = state
                    .cart_lines
                    .get(position)
                    .map(|l| l.product_uuid)
                    .ok_or(CartsServiceError::LineNotFound)?;

                stock_level(&state.products, product)?.ensure_covers(quantity)?;

                let record = state
                    .cart_lines
                    .get_mut(position)
                    .ok_or(CartsServiceError::LineNotFound)?;

                record.quantity = quantity;
                record.updated_at = Timestamp::now();

                CartLineUpdate::Updated(record.clone())
            }
        };

        info!(%user, %line, ?change, "cart line updated");

        Ok(update)
    }

    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let user = authenticated(user)?;

        let mut state = self.store.lock().await;

        let position = state
            .cart_lines
            .iter()
            .position(|l| l.uuid == line && l.user_uuid == user)
            .ok_or(CartsServiceError::LineNotFound)?;

        state.cart_lines.remove(position);

        info!(%user, %line, "cart line removed");

        Ok(())
    }

    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let user = authenticated(user)?;

        let state = self.store.lock().await;

        build_cart(user, &state.cart_lines, &state.products)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let user = authenticated(user)?;

        let mut state = self.store.lock().await;

        let before = state.cart_lines.len();

        state.cart_lines.retain(|l| l.user_uuid != user);

        let removed = u64::try_from(before - state.cart_lines.len()).unwrap_or(u64::MAX);

        info!(%user, removed, "cart cleared");

        Ok(removed)
    }
}
