//! Order placement and lookup.

use std::sync::Arc;

use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::pagination::{Page, Pageable};
use storefront_core::types::DbId;
use storefront_core::validation::{parse_id, require_positive_quantity};
use storefront_db::models::order::{NewOrder, NewOrderItem, Order};
use storefront_db::repositories::OrderStore;

use super::ServiceError;

/// Body of `POST /order`. `null` entries in `items` are accepted and skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderCommand {
    pub account_id: String,
    #[serde(default)]
    pub items: Vec<Option<OrderLineCommand>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineCommand {
    pub item_id: String,
    pub quantity: i32,
}

impl OrderLineCommand {
    fn to_new_line(&self) -> Result<NewOrderItem, CoreError> {
        require_positive_quantity(self.quantity)?;
        Ok(NewOrderItem {
            item_id: parse_id(&self.item_id, "item id")?,
            quantity: self.quantity,
        })
    }
}

impl CreateOrderCommand {
    fn to_new_order(&self) -> Result<NewOrder, CoreError> {
        let items = self
            .items
            .iter()
            .map(|line| line.as_ref().map(OrderLineCommand::to_new_line).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewOrder {
            account_id: parse_id(&self.account_id, "account id")?,
            items,
        })
    }
}

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore<DbId>>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore<DbId>>) -> Self {
        Self { store }
    }

    /// Validate every line, then hand the whole order to the store, which
    /// writes it atomically or not at all.
    #[tracing::instrument(skip(self, command), fields(account_id = %command.account_id))]
    pub async fn create(&self, command: &CreateOrderCommand) -> Result<Order, ServiceError> {
        let input = command.to_new_order()?;
        self.store
            .create(Some(&input))
            .await
            .map_err(ServiceError::repository(format!(
                "failed to create order for account: {}",
                input.account_id
            )))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Order, ServiceError> {
        let order_id = parse_id(id, "order id")?;
        self.store
            .get_by_id(order_id)
            .await
            .map_err(ServiceError::repository(format!(
                "failed to get order by id: {order_id}"
            )))
    }

    /// Orders placed by one account. An account without orders gives an
    /// empty page.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        account_id: &str,
        pageable: &Pageable,
    ) -> Result<Page<Order>, ServiceError> {
        let account_id = parse_id(account_id, "account id")?;
        self.store
            .search(account_id, pageable)
            .await
            .map_err(ServiceError::repository(format!(
                "failed to search orders for account: {account_id}"
            )))
    }
}
