//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::items::NewItem;
use crate::domain::Item;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            title: i.title,
            description: i.description,
            owner_id: i.owner_id,
            created_at: i.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1–255 characters"))]
    pub title: String,
    pub description: Option<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(r: CreateItemRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
        }
    }
}
