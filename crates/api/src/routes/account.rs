//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// GET    /{id}/orders      -> list_orders
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(account::create))
        .route("/{id}", get(account::get_by_id))
        .route("/{id}/orders", get(account::list_orders))
}
