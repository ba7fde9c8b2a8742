//! Route definitions for the `/item` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Routes mounted at `/item`.
///
/// ```text
/// GET    /                 -> list
/// GET    /{id}             -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list))
        .route("/{id}", get(item::get_by_id))
}
