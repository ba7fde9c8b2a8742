//! Item catalog reads.

use std::sync::Arc;

use storefront_core::pagination::{Page, Pageable};
use storefront_core::types::DbId;
use storefront_core::validation::parse_id;
use storefront_db::models::item::Item;
use storefront_db::repositories::ItemStore;

use super::ServiceError;

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore<DbId>>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore<DbId>>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Item, ServiceError> {
        let item_id = parse_id(id, "item id")?;
        self.store
            .get_by_id(item_id)
            .await
            .map_err(ServiceError::repository(format!(
                "failed to get item by id: {item_id}"
            )))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_page(&self, pageable: &Pageable) -> Result<Page<Item>, ServiceError> {
        self.store
            .get_page(pageable)
            .await
            .map_err(ServiceError::repository("failed to get item page"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use storefront_core::pagination::Sort;
    use storefront_db::models::item::NewItem;
    use storefront_db::RepoError;

    use super::*;

    struct MemoryItems(Vec<Item>);

    #[async_trait]
    impl ItemStore<DbId> for MemoryItems {
        async fn get_by_id(&self, id: DbId) -> Result<Item, RepoError> {
            self.0
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or(RepoError::NotFound {
                    entity: "Item",
                    key: id.to_string(),
                })
        }

        async fn get_page(&self, pageable: &Pageable) -> Result<Page<Item>, RepoError> {
            let offset = pageable.offset as usize;
            let window: Vec<Item> = match pageable.limit() {
                Some(limit) => self.0.iter().skip(offset).take(limit as usize).cloned().collect(),
                None => self.0.iter().skip(offset).cloned().collect(),
            };
            Ok(Page::new(window, self.0.len() as i64, pageable.size))
        }

        async fn create(&self, _item: Option<&NewItem>) -> Result<Item, RepoError> {
            Err(RepoError::NilEntity)
        }
    }

    fn catalog(n: usize) -> ItemService {
        let items = (0..n)
            .map(|i| {
                Item::new(&NewItem {
                    title: format!("item-{i}"),
                    description: None,
                    price: i as f64,
                })
            })
            .collect();
        ItemService::new(Arc::new(MemoryItems(items)))
    }

    #[tokio::test]
    async fn page_reports_totals_for_whole_catalog() {
        let service = catalog(7);

        let page = service
            .get_page(&Pageable::new(3, 6, Sort::default()))
            .await
            .unwrap();
        assert_eq!(page.elements.len(), 1);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn malformed_item_id_is_validation() {
        let service = catalog(1);

        assert_matches!(service.get_by_id("12").await, Err(ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_item_is_wrapped_not_found() {
        let service = catalog(1);
        let id = storefront_core::types::new_id();

        let err = service.get_by_id(&id.to_string()).await.unwrap_err();
        assert_matches!(err.repo_error(), Some(RepoError::NotFound { entity: "Item", .. }));
    }
}
