//! Item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{self, DbId, Timestamp};

/// An item row from the `items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    /// Build a new item with a fresh id and timestamps.
    pub fn new(input: &NewItem) -> Self {
        let now = types::now();
        Self {
            id: types::new_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating a new item. `price` must be non-negative (enforced by a
/// CHECK constraint).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
}
