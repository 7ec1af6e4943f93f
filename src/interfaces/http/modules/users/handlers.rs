//! User API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateUserRequest, UserDto};
use crate::application::identity::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiError, ApiPath, ApiQuery, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::shared::PageParams;

/// User handler state, concrete over `UserRepository`.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The authenticated user", body = UserDto),
        (status = 400, description = "Inactive user", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn get_me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserDto> {
    Json(UserDto::from(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 409, description = "Username already registered", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = state.user_service.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PageParams),
    responses(
        (status = 200, description = "User list", body = Vec<UserDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Malformed query string", body = ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.user_service.list_users(page).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<UserDto>, ApiError> {
    match state.user_service.get_user(user_id).await? {
        Some(user) => Ok(Json(UserDto::from(user))),
        None => Err(ApiError::NotFound("User not found".into())),
    }
}
