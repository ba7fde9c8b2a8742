//! Handlers for the `/account` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::pagination::Page;
use storefront_db::models::account::Account;
use storefront_db::models::order::Order;

use crate::error::AppResult;
use crate::query::PageParams;
use crate::services::CreateAccountCommand;
use crate::state::AppState;

/// POST /api/v1/account
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAccountCommand>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let account = state.accounts.create(&input).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /api/v1/account/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let account = state.accounts.get_by_id(&id).await?;
    Ok(Json(account))
}

/// GET /api/v1/account/{id}/orders?size=&offset=&sort=
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<Order>>> {
    let pageable = params.to_pageable()?;
    let page = state.orders.search(&id, &pageable).await?;
    Ok(Json(page))
}
