//! Inventory Ledger
//!
//! The single authority over sellable stock. Reads are available to anyone;
//! the decrement only exists on the transaction-scoped ledgers used by checkout.

pub mod errors;
pub(crate) mod ledger;
pub(crate) mod memory;
pub mod models;
pub mod service;

pub use errors::InventoryError;
pub use memory::MemoryInventoryService;
pub use models::{StockLevel, StockShortfall};
pub use service::*;
