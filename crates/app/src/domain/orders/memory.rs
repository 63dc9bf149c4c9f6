//! In-memory orders.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        orders::{
            OrdersService,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
        },
        users::{UserUuid, authenticated},
    },
    memory::MemoryStore,
};

#[derive(Debug, Clone)]
pub struct MemoryOrdersService {
    store: Arc<MemoryStore>,
}

impl MemoryOrdersService {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrdersService for MemoryOrdersService {
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let user = authenticated(user)?;

        let state = self.store.lock().await;

        state
            .orders
            .iter()
            .find(|o| o.uuid == order && o.user_uuid == user)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let user = authenticated(user)?;

        let state = self.store.lock().await;

        Ok(state
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_uuid == user)
            .cloned()
            .collect())
    }
}
