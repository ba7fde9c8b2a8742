use std::sync::Arc;
use std::time::Duration;

use storefront_db::repositories::{AccountRepo, ItemRepo, OrderRepo};

use crate::services::{AccountService, ItemService, OrderService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storefront_db::DbPool,
    pub accounts: AccountService,
    pub items: ItemService,
    pub orders: OrderService,
}

impl AppState {
    /// Wire the Postgres repositories into the services. `query_timeout`
    /// bounds every repository call.
    pub fn new(pool: storefront_db::DbPool, query_timeout: Option<Duration>) -> Self {
        let accounts = AccountService::new(Arc::new(AccountRepo::new(pool.clone(), query_timeout)));
        let items = ItemService::new(Arc::new(ItemRepo::new(pool.clone(), query_timeout)));
        let orders = OrderService::new(Arc::new(OrderRepo::new(pool.clone(), query_timeout)));

        Self {
            pool,
            accounts,
            items,
            orders,
        }
    }
}
