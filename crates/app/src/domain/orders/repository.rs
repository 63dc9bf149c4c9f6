//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{int_column, try_get_count},
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        products::records::ProductUuid,
        users::UserUuid,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut order = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.get_order_items(tx, &[order.uuid]).await?;

        Ok(order)
    }

    /// The user's orders, newest first, each with its items.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in self.get_order_items(tx, &uuids).await? {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|o| o.into_uuid()).collect();

        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Write an order and its items. Items are stored in the order given.
    ///
    /// Returns the order as stored, with the database-assigned creation time.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut created = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.subtotal)
            .bind(order.status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        for (position, item) in (0_u32..).zip(&order.items) {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(item.order_uuid.into_uuid())
                .bind(item.product_uuid.into_uuid())
                .bind(int_column(position, "position")?)
                .bind(int_column(item.quantity, "quantity")?)
                .bind(item.price_at_purchase)
                .bind(item.line_total)
                .execute(&mut **tx)
                .await?;
        }

        created.items = order.items;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: Vec::new(),
            subtotal: row.try_get("subtotal")?,
            status: status
                .parse::<OrderStatus>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(e),
                })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            price_at_purchase: row.try_get::<Decimal, _>("price_at_purchase")?.normalize(),
            line_total: row.try_get("line_total")?,
        })
    }
}
