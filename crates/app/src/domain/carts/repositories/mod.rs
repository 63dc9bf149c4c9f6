//! Cart Repositories

mod items;
mod lines;

pub(crate) use items::PgCartItemsRepository;
pub(crate) use lines::PgCartLinesRepository;
