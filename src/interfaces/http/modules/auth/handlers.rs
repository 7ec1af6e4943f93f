//! Token endpoint

use axum::{extract::State, Json};

use super::dto::{LoginForm, TokenResponse};
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedForm};
use crate::interfaces::http::middleware::AuthState;

#[utoipa::path(
    post,
    path = "/token",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorBody),
        (status = 422, description = "Malformed form", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::Unprocessable(
                "grant_type: must be \"password\"".into(),
            ));
        }
    }

    let token = state
        .user_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token: token.access_token,
        token_type: token.token_type,
    }))
}
