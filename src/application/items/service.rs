//! Item service
//!
//! Every operation takes the acting user; items of other users are
//! invisible through this API.

use std::sync::Arc;

use tracing::info;

use crate::domain::{CreateItemDto, DomainResult, Item, ItemRepositoryInterface, User};
use crate::shared::PageParams;

#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
}

pub struct ItemService<R: ItemRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: ItemRepositoryInterface> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create_item(&self, owner: &User, new_item: NewItem) -> DomainResult<Item> {
        let item = self
            .repo
            .create_item(CreateItemDto {
                title: new_item.title,
                description: new_item.description,
                owner_id: owner.id,
            })
            .await?;

        info!(item_id = item.id, owner_id = owner.id, "Item created");
        Ok(item)
    }

    pub async fn list_items(&self, owner: &User, page: PageParams) -> DomainResult<Vec<Item>> {
        self.repo.list_items_for_owner(owner.id, page).await
    }

    /// `None` both for a missing item and for someone else's item.
    pub async fn get_item(&self, owner: &User, item_id: i32) -> DomainResult<Option<Item>> {
        self.repo.get_item_for_owner(owner.id, item_id).await
    }
}
