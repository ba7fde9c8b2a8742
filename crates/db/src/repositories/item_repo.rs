//! Repository for the `items` table.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use storefront_core::pagination::{Page, Pageable};
use storefront_core::types::DbId;

use super::{begin_snapshot, order_by_clause, with_timeout, ItemStore};
use crate::error::RepoError;
use crate::models::item::{Item, NewItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, price, created_at, updated_at";

/// Columns a page request may sort by.
pub const SORTABLE: &[&str] = &["id", "title", "description", "price", "created_at", "updated_at"];

/// Provides lookups, paging and inserts for items.
#[derive(Debug, Clone)]
pub struct ItemRepo {
    pool: PgPool,
    query_timeout: Option<Duration>,
}

impl ItemRepo {
    pub fn new(pool: PgPool, query_timeout: Option<Duration>) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ItemStore<DbId> for ItemRepo {
    async fn get_by_id(&self, id: DbId) -> Result<Item, RepoError> {
        with_timeout(self.query_timeout, async {
            let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
            sqlx::query_as::<_, Item>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| RepoError::not_found("Item", id))
        })
        .await
    }

    /// Count and window queries share one snapshot so `total_elements`
    /// matches the rows the window was cut from.
    async fn get_page(&self, pageable: &Pageable) -> Result<Page<Item>, RepoError> {
        let order_by = order_by_clause(pageable, SORTABLE)?;

        with_timeout(self.query_timeout, async {
            let mut tx = begin_snapshot(&self.pool).await?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM items")
                .fetch_one(&mut *tx)
                .await?;

            let query = format!("SELECT {COLUMNS} FROM items{order_by} LIMIT $1 OFFSET $2");
            let items = sqlx::query_as::<_, Item>(&query)
                .bind(pageable.limit())
                .bind(pageable.offset)
                .fetch_all(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(Page::new(items, total, pageable.size))
        })
        .await
    }

    async fn create(&self, item: Option<&NewItem>) -> Result<Item, RepoError> {
        let input = item.ok_or(RepoError::NilEntity)?;
        let item = Item::new(input);

        with_timeout(self.query_timeout, async {
            let query = format!(
                "INSERT INTO items (id, title, description, price, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {COLUMNS}"
            );
            let created = sqlx::query_as::<_, Item>(&query)
                .bind(item.id)
                .bind(&item.title)
                .bind(&item.description)
                .bind(item.price)
                .bind(item.created_at)
                .bind(item.updated_at)
                .fetch_one(&self.pool)
                .await?;

            tracing::debug!(item_id = %created.id, "Item created");
            Ok(created)
        })
        .await
    }
}
