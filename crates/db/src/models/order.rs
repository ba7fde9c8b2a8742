//! Order and order-line entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{self, DbId, Timestamp};

/// An order row from the `orders` table, with its lines eagerly loaded.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub account_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Lines from `order_items`, ordered by `position`.
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Build a new, empty order header owned by `account_id`.
    pub fn new(account_id: DbId) -> Self {
        let now = types::now();
        Self {
            id: types::new_id(),
            account_id,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }
}

/// A row from the `order_items` association table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub item_id: DbId,
    pub quantity: i32,
    /// Zero-based index of the line within its order.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderItem {
    /// Build a line for `order_id` at `position`.
    pub fn new(order_id: DbId, line: &NewOrderItem, position: i32) -> Self {
        let now = types::now();
        Self {
            id: types::new_id(),
            order_id,
            item_id: line.item_id,
            quantity: line.quantity,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating an order. `None` lines are skipped on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub account_id: DbId,
    #[serde(default)]
    pub items: Vec<Option<NewOrderItem>>,
}

/// DTO for a single order line.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    pub item_id: DbId,
    pub quantity: i32,
}
