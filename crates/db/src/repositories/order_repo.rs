//! Repository for the `orders` and `order_items` tables.
//!
//! Order creation is the only multi-statement write in the system: the
//! account check, the header insert and the line batch run in one
//! transaction, and creations within this process are serialized by an
//! async mutex.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, QueryBuilder};
use storefront_core::pagination::{Page, Pageable};
use storefront_core::types::DbId;
use tokio::sync::Mutex;

use super::{begin_snapshot, order_by_clause, with_timeout, OrderStore};
use crate::error::RepoError;
use crate::models::order::{NewOrder, Order, OrderItem};

/// Column list for the `orders` table.
const COLUMNS: &str = "id, account_id, created_at, updated_at";

/// Column list for the `order_items` table.
const ITEM_COLUMNS: &str =
    "id, order_id, item_id, quantity, position, created_at, updated_at";

/// Columns a search may sort by.
pub const SORTABLE: &[&str] = &["id", "account_id", "created_at", "updated_at"];

/// Provides transactional creation and eager-loading reads for orders.
#[derive(Debug)]
pub struct OrderRepo {
    pool: PgPool,
    query_timeout: Option<Duration>,
    /// One order creation at a time within this process.
    create_lock: Mutex<()>,
}

impl OrderRepo {
    pub fn new(pool: PgPool, query_timeout: Option<Duration>) -> Self {
        Self {
            pool,
            query_timeout,
            create_lock: Mutex::new(()),
        }
    }

    /// Runs under the creation lock. Dropping the transaction on any early
    /// return rolls it back.
    async fn create_in_tx(&self, input: &NewOrder) -> Result<Order, RepoError> {
        let mut order = Order::new(input.account_id);

        let mut tx = self.pool.begin().await.map_err(RepoError::in_transaction)?;

        let account_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                .bind(order.account_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepoError::in_transaction)?;

        if !account_exists {
            tx.rollback().await.map_err(RepoError::in_transaction)?;
            tracing::warn!(account_id = %order.account_id, "Order rejected: unknown account");
            return Err(RepoError::not_found("Account", order.account_id));
        }

        let header = format!("INSERT INTO orders ({COLUMNS}) VALUES ($1, $2, $3, $4)");
        sqlx::query(&header)
            .bind(order.id)
            .bind(order.account_id)
            .bind(order.created_at)
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(RepoError::in_transaction)?;

        order.items = (0..)
            .zip(input.items.iter().flatten())
            .map(|(position, line)| OrderItem::new(order.id, line, position))
            .collect();

        if let Err(err) = insert_items(&mut *tx, &order.items).await {
            tracing::warn!(order_id = %order.id, error = %err, "Order rolled back: line insert failed");
            return Err(RepoError::in_transaction(err));
        }

        tx.commit().await.map_err(RepoError::in_transaction)?;

        tracing::debug!(
            order_id = %order.id,
            account_id = %order.account_id,
            lines = order.items.len(),
            "Order created"
        );
        Ok(order)
    }

    /// Load the lines for each order in one round trip and attach them.
    async fn attach_items(
        conn: &mut PgConnection,
        orders: &mut [Order],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY order_id, position"
        );
        let lines = sqlx::query_as::<_, OrderItem>(&query)
            .bind(&ids)
            .fetch_all(&mut *conn)
            .await?;

        let mut by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
        for line in lines {
            by_order.entry(line.order_id).or_default().push(line);
        }
        for order in orders.iter_mut() {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }
        Ok(())
    }
}

/// Write all lines of one order as a single multi-row INSERT.
async fn insert_items(conn: &mut PgConnection, items: &[OrderItem]) -> Result<(), sqlx::Error> {
    if items.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::new(format!("INSERT INTO order_items ({ITEM_COLUMNS}) "));
    builder.push_values(items, |mut row, item| {
        row.push_bind(item.id)
            .push_bind(item.order_id)
            .push_bind(item.item_id)
            .push_bind(item.quantity)
            .push_bind(item.position)
            .push_bind(item.created_at)
            .push_bind(item.updated_at);
    });
    builder.build().execute(conn).await?;
    Ok(())
}

#[async_trait]
impl OrderStore<DbId> for OrderRepo {
    async fn get_by_id(&self, id: DbId) -> Result<Order, RepoError> {
        with_timeout(self.query_timeout, async {
            let mut conn = self.pool.acquire().await?;

            let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
            let order = sqlx::query_as::<_, Order>(&query)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| RepoError::not_found("Order", id))?;

            let mut orders = [order];
            Self::attach_items(&mut *conn, &mut orders).await?;
            let [order] = orders;
            Ok(order)
        })
        .await
    }

    async fn search(&self, account_id: DbId, pageable: &Pageable) -> Result<Page<Order>, RepoError> {
        let order_by = order_by_clause(pageable, SORTABLE)?;

        with_timeout(self.query_timeout, async {
            let mut tx = begin_snapshot(&self.pool).await?;

            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM orders WHERE account_id = $1")
                    .bind(account_id)
                    .fetch_one(&mut *tx)
                    .await?;

            if total == 0 {
                tx.commit().await?;
                return Ok(Page::empty());
            }

            let query = format!(
                "SELECT {COLUMNS} FROM orders WHERE account_id = $1{order_by} LIMIT $2 OFFSET $3"
            );
            let mut orders = sqlx::query_as::<_, Order>(&query)
                .bind(account_id)
                .bind(pageable.limit())
                .bind(pageable.offset)
                .fetch_all(&mut *tx)
                .await?;

            Self::attach_items(&mut *tx, &mut orders).await?;

            tx.commit().await?;
            Ok(Page::new(orders, total, pageable.size))
        })
        .await
    }

    /// Serialized, all-or-nothing creation:
    ///
    /// 1. `None` is rejected before any I/O.
    /// 2. The process-local creation lock is taken.
    /// 3. Inside one transaction the account is checked with `SELECT EXISTS`,
    ///    the header is inserted, then every `Some` line (with `order_id` and
    ///    `position` filled in) is inserted as one batch.
    /// 4. Commit. Any failure leaves neither header nor lines behind.
    async fn create(&self, order: Option<&NewOrder>) -> Result<Order, RepoError> {
        let input = order.ok_or(RepoError::NilEntity)?;

        with_timeout(self.query_timeout, async {
            let _guard = self.create_lock.lock().await;
            self.create_in_tx(input).await
        })
        .await
    }
}
