//! Product Handlers

pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
pub(crate) mod tests {
    use halalchain_app::domain::products::records::{ProductRecord, ProductUuid};
    use jiff::Timestamp;
    use rust_decimal_macros::dec;

    pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
        ProductRecord {
            uuid,
            name: "Medjool dates".to_string(),
            price: dec!(4.5),
            stock_quantity: 12,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
