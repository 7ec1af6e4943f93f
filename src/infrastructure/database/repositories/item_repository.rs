use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{CreateItemDto, DomainResult, Item, ItemRepositoryInterface};
use crate::infrastructure::database::entities::item;
use crate::shared::PageParams;

pub struct ItemRepository {
    db: DatabaseConnection,
}

impl ItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn item_model_to_domain(model: item::Model) -> Item {
    Item {
        id: model.id,
        title: model.title,
        description: model.description,
        owner_id: model.owner_id,
        created_at: model.created_at,
    }
}

#[async_trait]
impl ItemRepositoryInterface for ItemRepository {
    async fn create_item(&self, dto: CreateItemDto) -> DomainResult<Item> {
        let new_item = item::ActiveModel {
            title: Set(dto.title),
            description: Set(dto.description),
            owner_id: Set(dto.owner_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_item.insert(&self.db).await?;
        Ok(item_model_to_domain(model))
    }

    async fn list_items_for_owner(
        &self,
        owner_id: i32,
        page: PageParams,
    ) -> DomainResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id)
            .offset(page.effective_skip())
            .limit(page.effective_limit())
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(item_model_to_domain).collect())
    }

    async fn get_item_for_owner(&self, owner_id: i32, item_id: i32) -> DomainResult<Option<Item>> {
        let model = item::Entity::find_by_id(item_id)
            .filter(item::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?;

        Ok(model.map(item_model_to_domain))
    }
}
