//! Handlers for the `/item` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use storefront_core::pagination::Page;
use storefront_db::models::item::Item;

use crate::error::AppResult;
use crate::query::PageParams;
use crate::state::AppState;

/// GET /api/v1/item?size=&offset=&sort=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<Item>>> {
    let pageable = params.to_pageable()?;
    let page = state.items.get_page(&pageable).await?;
    Ok(Json(page))
}

/// GET /api/v1/item/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let item = state.items.get_by_id(&id).await?;
    Ok(Json(item))
}
