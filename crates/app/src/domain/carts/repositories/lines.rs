//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{int_column, try_get_count},
    domain::{
        carts::records::{CartLineRecord, CartLineUuid},
        products::records::ProductUuid,
        users::UserUuid,
    },
};

const FIND_LINE_FOR_PRODUCT_SQL: &str = include_str!("../sql/find_line_for_product.sql");
const GET_LINE_SQL: &str = include_str!("../sql/get_line.sql");
const LOCK_LINES_SQL: &str = include_str!("../sql/lock_lines.sql");
const UPSERT_LINE_SQL: &str = include_str!("../sql/upsert_line.sql");
const SET_QUANTITY_SQL: &str = include_str!("../sql/set_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("../sql/delete_line.sql");
const CLEAR_LINES_SQL: &str = include_str!("../sql/clear_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock and return the user's line for `product`, if there is one.
    pub(crate) async fn find_line_for_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(FIND_LINE_FOR_PRODUCT_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock and return one of the user's lines. Another user's line is `RowNotFound`.
    pub(crate) async fn get_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_LINE_SQL)
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock every line in the user's cart, in insertion order.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LOCK_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, or add `quantity` to the existing line for the same product.
    ///
    /// Returns `None` when the merged quantity would exceed the product's stock.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPSERT_LINE_SQL)
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(int_column(quantity, "quantity")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(SET_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .bind(int_column(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_LINES_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
