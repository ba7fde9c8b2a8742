//! Repository layer.
//!
//! Each entity exposes an async store trait keyed by its identifier type,
//! which the service layer depends on, and a Postgres implementation that
//! holds a pool handle and the configured per-operation deadline.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::pagination::{Page, Pageable};

use crate::error::RepoError;
use crate::models::account::{Account, NewAccount};
use crate::models::item::{Item, NewItem};
use crate::models::order::{NewOrder, Order};

pub mod account_repo;
pub mod item_repo;
pub mod order_repo;

pub use account_repo::AccountRepo;
pub use item_repo::ItemRepo;
pub use order_repo::OrderRepo;

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// Persistence contract for accounts.
#[async_trait]
pub trait AccountStore<Id: Send + 'static>: Send + Sync {
    async fn get_by_id(&self, id: Id) -> Result<Account, RepoError>;

    async fn get_by_email(&self, email: &str) -> Result<Account, RepoError>;

    /// Insert a new account. `None` fails with [`RepoError::NilEntity`].
    async fn create(&self, account: Option<&NewAccount>) -> Result<Account, RepoError>;
}

/// Persistence contract for items.
#[async_trait]
pub trait ItemStore<Id: Send + 'static>: Send + Sync {
    async fn get_by_id(&self, id: Id) -> Result<Item, RepoError>;

    async fn get_page(&self, pageable: &Pageable) -> Result<Page<Item>, RepoError>;

    /// Insert a new item. `None` fails with [`RepoError::NilEntity`].
    async fn create(&self, item: Option<&NewItem>) -> Result<Item, RepoError>;
}

/// Persistence contract for orders and their lines.
#[async_trait]
pub trait OrderStore<Id: Send + 'static>: Send + Sync {
    /// Fetch one order with its lines.
    async fn get_by_id(&self, id: Id) -> Result<Order, RepoError>;

    /// Page through an account's orders. An unknown account yields an empty
    /// page, not an error.
    async fn search(&self, account_id: Id, pageable: &Pageable) -> Result<Page<Order>, RepoError>;

    /// Atomically insert an order header and its non-`None` lines.
    async fn create(&self, order: Option<&NewOrder>) -> Result<Order, RepoError>;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Run `fut` under an optional deadline. On expiry the future is dropped,
/// which rolls back any transaction it had open.
pub(crate) async fn with_timeout<T, F>(limit: Option<Duration>, fut: F) -> Result<T, RepoError>
where
    F: Future<Output = Result<T, RepoError>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(?limit, "Repository operation timed out");
                Err(RepoError::Timeout(limit))
            }
        },
        None => fut.await,
    }
}

/// Begin a read-only transaction over a single snapshot, so a page query and
/// its `COUNT(*)` see the same rows.
pub(crate) async fn begin_snapshot(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Render the ` ORDER BY ...` fragment for a page query, or an empty string
/// for the natural order. Fails before any I/O on a non-sortable property.
pub(crate) fn order_by_clause(
    pageable: &Pageable,
    sortable: &[&str],
) -> Result<String, RepoError> {
    Ok(pageable
        .sort
        .order_by(sortable)?
        .map(|order_by| format!(" ORDER BY {order_by}"))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use storefront_core::pagination::{Direction, Sort};

    use super::*;

    #[test]
    fn order_by_clause_is_empty_for_natural_order() {
        let clause = order_by_clause(&Pageable::unpaged(), &["id"]).unwrap();
        assert_eq!(clause, "");
    }

    #[test]
    fn order_by_clause_prefixes_keyword() {
        let pageable = Pageable::new(
            5,
            0,
            Sort::by("title", Direction::Desc).then("id", Direction::Asc),
        );
        let clause = order_by_clause(&pageable, &["id", "title"]).unwrap();
        assert_eq!(clause, " ORDER BY title DESC, id ASC");
    }

    #[test]
    fn order_by_clause_rejects_unknown_column() {
        let pageable = Pageable::new(5, 0, Sort::by("email", Direction::Asc));
        let err = order_by_clause(&pageable, &["id"]).unwrap_err();
        assert!(matches!(err, RepoError::Core(_)));
    }

    #[tokio::test]
    async fn with_timeout_passes_result_through() {
        let value = with_timeout(Some(Duration::from_secs(5)), async { Ok::<_, RepoError>(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn with_timeout_reports_expiry() {
        let limit = Duration::from_millis(10);
        let err = with_timeout(Some(limit), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, RepoError>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Timeout(d) if d == limit));
    }
}
