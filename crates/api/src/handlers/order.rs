//! Handlers for the `/order` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_db::models::order::Order;

use crate::error::AppResult;
use crate::services::CreateOrderCommand;
use crate::state::AppState;

/// POST /api/v1/order
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderCommand>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create(&input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/order/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_by_id(&id).await?;
    Ok(Json(order))
}
