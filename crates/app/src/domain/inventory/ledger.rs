//! Transaction-scoped inventory ledger.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{int_column, try_get_count},
    domain::{
        inventory::{
            errors::InventoryError,
            models::{StockLevel, StockShortfall},
        },
        products::records::ProductUuid,
    },
};

const GET_STOCK_LEVEL_SQL: &str = include_str!("sql/get_stock_level.sql");
const LOCK_STOCK_LEVELS_SQL: &str = include_str!("sql/lock_stock_levels.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryLedger;

impl PgInventoryLedger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Unlocked read; good enough for advisory checks.
    pub(crate) async fn get_stock_level(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<StockLevel, sqlx::Error> {
        query_as::<Postgres, StockLevel>(GET_STOCK_LEVEL_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the product rows for the rest of the transaction and return a fresh
    /// reading of each. Rows are locked in UUID order so concurrent checkouts
    /// over overlapping products cannot deadlock.
    pub(crate) async fn lock_stock_levels(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<FxHashMap<ProductUuid, StockLevel>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        let levels = query_as::<Postgres, StockLevel>(LOCK_STOCK_LEVELS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(levels
            .into_iter()
            .map(|level| (level.product_uuid, level))
            .collect())
    }

    /// Take `quantity` units out of stock, or fail without touching the row.
    ///
    /// Returns the stock remaining after the decrement.
    pub(crate) async fn reserve_and_decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, InventoryError> {
        let remaining: Option<i32> = query_scalar(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(int_column(quantity, "stock_quantity")?)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(remaining) = remaining {
            return u32::try_from(remaining).map_err(|e| {
                InventoryError::Sql(sqlx::Error::ColumnDecode {
                    index: "stock_quantity".to_string(),
                    source: Box::new(e),
                })
            });
        }

        let level = self.get_stock_level(tx, product).await?;

        Err(InventoryError::InsufficientStock(StockShortfall {
            product_uuid: product,
            name: level.name,
            requested: quantity,
            available: level.available,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for StockLevel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: row.try_get::<Decimal, _>("price")?.normalize(),
            available: try_get_count(row, "stock_quantity")?,
        })
    }
}
