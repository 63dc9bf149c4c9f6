//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::try_get_count,
    domain::{carts::records::CartLineUuid, inventory::StockLevel, users::UserUuid},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");

/// A cart line joined with a stock reading of its product.
#[derive(Debug, Clone)]
pub(crate) struct CartLineStock {
    pub(crate) line_uuid: CartLineUuid,
    pub(crate) quantity: u32,
    pub(crate) level: StockLevel,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineStock>, sqlx::Error> {
        query_as::<Postgres, CartLineStock>(GET_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineStock {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            line_uuid: CartLineUuid::from_uuid(row.try_get("line_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            level: StockLevel::from_row(row)?,
        })
    }
}
