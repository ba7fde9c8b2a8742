//! Route definitions for the `/order` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/order`.
///
/// ```text
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(order::create))
        .route("/{id}", get(order::get_by_id))
}
