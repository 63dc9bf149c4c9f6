//! Authentication
//!
//! Callers authenticate with opaque API tokens. Only a SHA-256 digest of each
//! token is stored; the raw token is shown once, when it is issued.

mod errors;
pub(crate) mod memory;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use memory::MemoryAuthService;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
