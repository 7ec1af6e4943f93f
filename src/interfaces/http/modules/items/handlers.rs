//! Item API handlers
//!
//! All routes act on the caller's own items.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateItemRequest, ItemDto};
use crate::application::items::ItemService;
use crate::infrastructure::database::repositories::ItemRepository;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiQuery, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::shared::PageParams;

#[derive(Clone)]
pub struct ItemHandlerState {
    pub item_service: Arc<ItemService<ItemRepository>>,
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    security(("bearer_auth" = [])),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_item(
    State(state): State<ItemHandlerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    let item = state.item_service.create_item(&user, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ItemDto::from(item))))
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Malformed query string", body = ErrorBody)
    )
)]
pub async fn list_items(
    State(state): State<ItemHandlerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = state.item_service.list_items(&user, page).await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(("item_id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ItemDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Item not found", body = ErrorBody)
    )
)]
pub async fn get_item(
    State(state): State<ItemHandlerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(item_id): ApiPath<i32>,
) -> Result<Json<ItemDto>, ApiError> {
    match state.item_service.get_item(&user, item_id).await? {
        Some(item) => Ok(Json(ItemDto::from(item))),
        None => Err(ApiError::NotFound("Item not found".into())),
    }
}
