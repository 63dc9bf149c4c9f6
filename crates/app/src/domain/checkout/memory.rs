//! In-memory checkout.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::time::timeout;

use crate::{
    domain::{
        carts::records::CartLineRecord,
        checkout::{
            errors::CheckoutServiceError,
            plan::{CheckoutPhase, CheckoutTrace, plan_checkout},
            store::CheckoutStore,
        },
        inventory::{StockLevel, memory::reserve_and_decrement},
        orders::records::OrderRecord,
        products::records::{ProductRecord, ProductUuid},
        users::UserUuid,
    },
    memory::{MemoryState, MemoryStore},
};

#[derive(Debug, Clone)]
pub struct MemoryCheckoutStore {
    store: Arc<MemoryStore>,
}

impl MemoryCheckoutStore {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CheckoutStore for MemoryCheckoutStore {
    async fn attempt(
        &self,
        user: UserUuid,
        bound: Duration,
        trace: &mut CheckoutTrace,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let mut state = timeout(bound, self.store.lock()).await?;

        // No await past this point: the attempt runs to completion under the guard.
        let MemoryState {
            products,
            cart_lines,
            orders,
            ..
        } = &mut *state;

        let lines: Vec<CartLineRecord> = cart_lines
            .iter()
            .filter(|line| line.user_uuid == user)
            .cloned()
            .collect();

        let levels: FxHashMap<ProductUuid, StockLevel> = lines
            .iter()
            .filter_map(|line| products.get(&line.product_uuid))
            .map(|product| (product.uuid, StockLevel::from(product)))
            .collect();

        let order = plan_checkout(user, &lines, &levels, Timestamp::now())?;

        trace.advance(CheckoutPhase::Reserving);

        // Decrement copies so a failure part-way leaves the catalog untouched.
        let mut staged: FxHashMap<ProductUuid, ProductRecord> = order
            .items
            .iter()
            .filter_map(|item| products.get(&item.product_uuid))
            .map(|product| (product.uuid, product.clone()))
            .collect();

        for item in &order.items {
            reserve_and_decrement(&mut staged, item.product_uuid, item.quantity)?;
        }

        trace.advance(CheckoutPhase::Committing);

        products.extend(staged);
        cart_lines.retain(|line| line.user_uuid != user);
        orders.push(order.clone());

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;
    use tokio::task::JoinSet;

    use crate::{
        context::AppContext,
        domain::{
            carts::{CartsServiceError, data::NewCartLine},
            checkout::{CheckoutConfig, CheckoutFailure, CheckoutService, MemoryCheckoutService},
            orders::OrdersServiceError,
        },
        test::helpers::create_product,
    };

    use super::*;

    fn context() -> AppContext {
        AppContext::in_memory(CheckoutConfig::default())
    }

    fn line(product: ProductUuid, quantity: i64) -> NewCartLine {
        NewCartLine {
            product_uuid: product,
            quantity,
        }
    }

    #[tokio::test]
    async fn checkout_places_order_decrements_stock_and_clears_cart() -> TestResult {
        let ctx = context();
        let user = UserUuid::new();
        let p1 = create_product(ctx.products.as_ref(), "Dates", dec!(4.50), 5).await?;

        ctx.carts.add_line(user, line(p1.uuid, 3)).await?;

        let rejected = ctx.carts.add_line(user, line(p1.uuid, 3)).await;

        assert!(
            matches!(rejected, Err(CartsServiceError::InsufficientStock(_))),
            "expected InsufficientStock, got {rejected:?}"
        );

        let order = ctx.checkout.checkout(user).await?;

        assert_eq!(order.user_uuid, user);
        assert_eq!(order.items.len(), 1, "one line becomes one order item");
        assert_eq!(order.subtotal, dec!(13.50));
        assert_eq!(ctx.inventory.get_available(p1.uuid).await?, 2);
        assert!(ctx.carts.get_cart(user).await?.is_empty(), "cart should be cleared");

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let ctx = context();

        let result = ctx.checkout.checkout(UserUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn nil_user_is_unauthorized() {
        let ctx = context();

        let result = ctx.checkout.checkout(UserUuid::from_uuid(uuid::Uuid::nil())).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Unauthorized(_))),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_checkout_leaves_stock_and_cart_untouched() -> TestResult {
        let ctx = context();
        let buyer = UserUuid::new();
        let rival = UserUuid::new();

        let mut products = Vec::new();

        for n in 0..10 {
            let name = format!("Item {n}");

            products.push(create_product(ctx.products.as_ref(), &name, dec!(1.25), 2).await?);
        }

        for product in &products {
            ctx.carts.add_line(buyer, line(product.uuid, 2)).await?;
        }

        let last = products.last().map(|p| p.uuid).ok_or("no products")?;

        ctx.carts.add_line(rival, line(last, 1)).await?;
        ctx.checkout.checkout(rival).await?;

        let before = ctx.carts.get_cart(buyer).await?;
        let result = ctx.checkout.checkout(buyer).await;

        assert!(
            matches!(
                &result,
                Err(CheckoutServiceError::InsufficientStock(shortfall)) if shortfall.product_uuid == last
            ),
            "expected InsufficientStock for the drained product, got {result:?}"
        );

        for product in &products {
            let expected = if product.uuid == last { 1 } else { 2 };

            assert_eq!(
                ctx.inventory.get_available(product.uuid).await?,
                expected,
                "stock of {} should be unchanged",
                product.name
            );
        }

        assert_eq!(ctx.carts.get_cart(buyer).await?, before, "cart should be unchanged");
        assert!(ctx.orders.list_orders(buyer).await?.is_empty(), "no order should exist");

        Ok(())
    }

    #[tokio::test]
    async fn single_item_checkout_fails_when_stock_is_taken() -> TestResult {
        let ctx = context();
        let buyer = UserUuid::new();
        let rival = UserUuid::new();
        let product = create_product(ctx.products.as_ref(), "Honey", dec!(9), 1).await?;

        ctx.carts.add_line(buyer, line(product.uuid, 1)).await?;
        ctx.carts.add_line(rival, line(product.uuid, 1)).await?;
        ctx.checkout.checkout(rival).await?;

        let before = ctx.carts.get_cart(buyer).await?;
        let result = ctx.checkout.checkout(buyer).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::InsufficientStock(_))),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(ctx.inventory.get_available(product.uuid).await?, 0);
        assert_eq!(ctx.carts.get_cart(buyer).await?, before, "cart should be unchanged");

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_checkouts_never_oversell() -> TestResult {
        let ctx = context();
        let product = create_product(ctx.products.as_ref(), "Olive oil", dec!(12), 5).await?;

        let mut buyers = Vec::new();

        for _ in 0..20 {
            let user = UserUuid::new();

            ctx.carts.add_line(user, line(product.uuid, 1)).await?;
            buyers.push(user);
        }

        let mut tasks = JoinSet::new();

        for user in buyers {
            let checkout = Arc::clone(&ctx.checkout);

            tasks.spawn(async move { checkout.checkout(user).await });
        }

        let mut placed = 0;

        while let Some(result) = tasks.join_next().await {
            match result? {
                Ok(_) => placed += 1,
                Err(CheckoutServiceError::InsufficientStock(_)) => {}
                Err(other) => return Err(format!("unexpected checkout error: {other}").into()),
            }
        }

        assert_eq!(placed, 5, "exactly the available stock should be sold");
        assert_eq!(ctx.inventory.get_available(product.uuid).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn order_prices_survive_repricing() -> TestResult {
        let ctx = context();
        let user = UserUuid::new();
        let product = create_product(ctx.products.as_ref(), "Saffron", dec!(7.25), 3).await?;

        ctx.carts.add_line(user, line(product.uuid, 2)).await?;

        let order = ctx.checkout.checkout(user).await?;

        ctx.products.update_price(product.uuid, dec!(99)).await?;

        let stored = ctx.orders.get_order(user, order.uuid).await?;

        assert_eq!(stored, order, "stored order should match the placed one");
        assert_eq!(
            stored.items.first().map(|item| item.price_at_purchase),
            Some(dec!(7.25))
        );
        assert_eq!(stored.subtotal, dec!(14.50));

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_private_to_their_user() -> TestResult {
        let ctx = context();
        let user = UserUuid::new();
        let product = create_product(ctx.products.as_ref(), "Rice", dec!(3), 10).await?;

        ctx.carts.add_line(user, line(product.uuid, 1)).await?;
        let first = ctx.checkout.checkout(user).await?;

        ctx.carts.add_line(user, line(product.uuid, 2)).await?;
        let second = ctx.checkout.checkout(user).await?;

        let listed = ctx.orders.list_orders(user).await?;

        assert_eq!(
            listed.iter().map(|order| order.uuid).collect::<Vec<_>>(),
            vec![second.uuid, first.uuid],
            "orders should be listed newest first"
        );

        let result = ctx.orders.get_order(UserUuid::new(), first.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn held_store_times_out() {
        let store = MemoryStore::new();
        let checkout = MemoryCheckoutService::new(
            Arc::clone(&store),
            CheckoutConfig {
                timeout: Duration::from_millis(20),
                retry_transient: false,
            },
        );

        let _guard = store.lock().await;
        let result = checkout.checkout(UserUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Failed(CheckoutFailure::TimedOut))),
            "expected TimedOut, got {result:?}"
        );
    }
}
