//! Carts

pub mod data;
pub mod errors;
pub(crate) mod memory;
pub mod models;
pub mod records;
pub(crate) mod repositories;
pub(crate) mod rules;
pub mod service;

pub use errors::CartsServiceError;
pub use memory::MemoryCartsService;
pub use service::*;
