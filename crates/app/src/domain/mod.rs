//! HalalChain Domain Concerns

pub mod auth;
pub mod carts;
pub mod checkout;
pub mod inventory;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod users;
