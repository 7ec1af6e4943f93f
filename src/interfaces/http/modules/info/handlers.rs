//! Root and version endpoints

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const APP_TITLE: &str = "Hello Fastapi";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub title: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Info",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello fastapi".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "Info",
    responses((status = 200, description = "Application title and version", body = VersionResponse))
)]
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        title: APP_TITLE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
