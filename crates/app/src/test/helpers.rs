//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::products::{
    ProductsService, ProductsServiceError,
    data::NewProduct,
    records::{ProductRecord, ProductUuid},
};

/// A product record that has not been stored anywhere.
pub(crate) fn make_product(name: &str, price: Decimal, stock_quantity: u32) -> ProductRecord {
    let now = Timestamp::now();

    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        price,
        stock_quantity,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) async fn create_product(
    products: &dyn ProductsService,
    name: &str,
    price: Decimal,
    stock_quantity: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            stock_quantity,
        })
        .await
}
