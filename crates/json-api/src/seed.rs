//! Catalog seeding for the in-memory backend.

use std::path::Path;

use halalchain_app::domain::products::{
    ProductsService, ProductsServiceError, data::NewProduct, records::ProductUuid,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub(crate) enum SeedError {
    #[error("failed to read seed file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to create seeded product \"{name}\": {source}")]
    Product {
        name: String,
        #[source]
        source: ProductsServiceError,
    },
}

/// One product in a seed file. Prices may be given as strings or numbers.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    #[serde(default)]
    uuid: Option<Uuid>,
    name: String,
    price: Decimal,
    #[serde(default)]
    stock_quantity: u32,
}

impl From<SeedProduct> for NewProduct {
    fn from(seed: SeedProduct) -> Self {
        NewProduct {
            uuid: seed.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: seed.name,
            price: seed.price,
            stock_quantity: seed.stock_quantity,
        }
    }
}

fn parse(raw: &str) -> Result<Vec<SeedProduct>, SeedError> {
    serde_json::from_str(raw).map_err(SeedError::Parse)
}

/// Load every product in `path` into the catalog.
pub(crate) async fn load(path: &Path, products: &dyn ProductsService) -> Result<usize, SeedError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(SeedError::Read)?;

    let seeds = parse(&raw)?;
    let count = seeds.len();

    for seed in seeds {
        let name = seed.name.clone();

        products
            .create_product(seed.into())
            .await
            .map_err(|source| SeedError::Product { name, source })?;
    }

    info!(count, path = %path.display(), "seeded catalog");

    Ok(count)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn string_and_number_prices_are_accepted() -> TestResult {
        let seeds = parse(
            r#"[
                {"name": "Medjool dates", "price": "4.50", "stock_quantity": 5},
                {"name": "Saffron", "price": 12}
            ]"#,
        )?;

        let prices: Vec<Decimal> = seeds.iter().map(|seed| seed.price).collect();

        assert_eq!(prices, vec![dec!(4.50), dec!(12)]);
        assert_eq!(seeds.last().map(|seed| seed.stock_quantity), Some(0));

        Ok(())
    }

    #[test]
    fn fixed_uuid_is_kept() -> TestResult {
        let uuid = Uuid::now_v7();
        let seeds = parse(&format!(
            r#"[{{"uuid": "{uuid}", "name": "Honey", "price": "9"}}]"#
        ))?;

        let product: Vec<NewProduct> = seeds.into_iter().map(Into::into).collect();

        assert_eq!(product.first().map(|p| p.uuid.into_uuid()), Some(uuid));

        Ok(())
    }

    #[test]
    fn malformed_seed_is_rejected() {
        let result = parse(r#"{"name": "not a list"}"#);

        assert!(matches!(result, Err(SeedError::Parse(_))), "expected Parse, got {result:?}");
    }
}
