//! Products

pub mod data;
pub mod errors;
pub(crate) mod memory;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use memory::MemoryProductsService;
pub use service::*;
