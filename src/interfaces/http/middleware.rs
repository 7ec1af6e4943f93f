//! Authentication middleware for Axum
//!
//! Resolves `Authorization: Bearer <token>` to an active user and stores it
//! in the request extensions as [`CurrentUser`].

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::identity::UserService;
use crate::domain::User;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::ApiError;

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub user_service: Arc<UserService<UserRepository>>,
}

/// The authenticated, active caller.
///
/// Extract in handlers: `Extension(CurrentUser(user)): Extension<CurrentUser>`
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Token from an `Authorization` value. The scheme is case-insensitive.
fn extract_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// JWT authentication middleware - requires a valid token of an active user
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);

    let Some(token) = token else {
        return ApiError::Unauthorized("Not authenticated".into()).into_response();
    };

    match auth_state.user_service.current_user(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
