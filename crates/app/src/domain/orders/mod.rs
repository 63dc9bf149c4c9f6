//! Orders

pub mod errors;
pub(crate) mod memory;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use memory::MemoryOrdersService;
pub use service::*;
