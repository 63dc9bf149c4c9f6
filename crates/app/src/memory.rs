//! In-memory storage backend.
//!
//! Every in-memory service shares one [`MemoryStore`]. Its state sits behind a
//! single async mutex, which makes the store a single writer: whoever holds the
//! guard sees and mutates a consistent snapshot, and nobody else can observe a
//! half-applied change.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    auth::memory::StoredApiToken,
    carts::records::CartLineRecord,
    orders::records::OrderRecord,
    products::records::{ProductRecord, ProductUuid},
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) products: FxHashMap<ProductUuid, ProductRecord>,

    /// Kept in insertion order, which is also cart display order.
    pub(crate) cart_lines: Vec<CartLineRecord>,

    pub(crate) orders: Vec<OrderRecord>,

    pub(crate) api_tokens: Vec<StoredApiToken>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().await
    }
}
