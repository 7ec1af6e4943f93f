use async_trait::async_trait;

use super::{CreateItemDto, Item};
use crate::shared::{DomainResult, PageParams};

/// Every read is scoped to an owner; there is no unscoped lookup.
#[async_trait]
pub trait ItemRepositoryInterface: Send + Sync {
    async fn create_item(&self, dto: CreateItemDto) -> DomainResult<Item>;

    async fn list_items_for_owner(&self, owner_id: i32, page: PageParams)
        -> DomainResult<Vec<Item>>;
    async fn get_item_for_owner(&self, owner_id: i32, item_id: i32) -> DomainResult<Option<Item>>;
}
