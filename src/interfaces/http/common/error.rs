//! HTTP error responses
//!
//! Every failure leaves the service as `{"detail": "<message>"}`.
//! Authentication failures also carry `WWW-Authenticate: Bearer`.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    /// Details stay in the logs
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unprocessable(msg) => msg,
            ApiError::Internal => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody::new(self.detail()));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        if e.is_internal() {
            error!("Request failed: {}", e);
            return ApiError::Internal;
        }

        match e {
            DomainError::Validation(msg) => ApiError::Unprocessable(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            DomainError::InactiveUser => ApiError::BadRequest(e.to_string()),
            DomainError::Storage(_) | DomainError::Crypto(_) => ApiError::Internal,
        }
    }
}

/// Malformed query strings are reported like body validation failures.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_server_error() {
            error!("Path extraction failed: {}", rejection.body_text());
            ApiError::Internal
        } else {
            ApiError::Unprocessable(rejection.body_text())
        }
    }
}
