//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Line Data
///
/// `quantity` is taken as supplied by the caller and validated by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}
