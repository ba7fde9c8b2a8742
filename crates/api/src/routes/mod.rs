pub mod account;
pub mod health;
pub mod item;
pub mod order;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /account                      create (POST)
/// /account/{id}                 get
/// /account/{id}/orders          orders placed by the account (paged)
///
/// /item                         list (paged)
/// /item/{id}                    get
///
/// /order                        create (POST)
/// /order/{id}                   get, with lines
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/account", account::router())
        .nest("/item", item::router())
        .nest("/order", order::router())
}
