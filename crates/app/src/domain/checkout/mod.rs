//! Checkout
//!
//! Turns a user's cart into an order in one all-or-nothing step:
//!
//! 1. **Validating**: lock the cart lines and the stock rows they refer to,
//!    then re-check every line against a fresh reading.
//! 2. **Reserving**: decrement stock for every line.
//! 3. **Committing**: write the order with its price snapshot, clear the cart
//!    and commit.
//!
//! A failure at any step leaves no trace: no order, no stock change, and the
//! cart exactly as it was.

pub mod config;
pub mod errors;
pub(crate) mod memory;
pub mod plan;
pub mod service;
pub mod store;

pub use config::CheckoutConfig;
pub use errors::{CheckoutFailure, CheckoutServiceError};
pub use memory::MemoryCheckoutStore;
pub use plan::CheckoutPhase;
pub use service::*;
pub use store::{CheckoutStore, PgCheckoutStore};
