//! Validated body extractors for Axum
//!
//! `ValidatedJson<T>` and `ValidatedForm<T>` work like `axum::Json<T>` and
//! `axum::Form<T>`, but additionally run `validator::Validate::validate()`
//! on the deserialized value. On validation failure they return a 422
//! response listing the failing fields.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ErrorBody;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateUserRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Same as [`ValidatedJson`] for `application/x-www-form-urlencoded` bodies.
pub struct ValidatedForm<T>(pub T);

/// Error type for validated extraction failures.
pub enum ValidationRejection {
    /// JSON parsing failed.
    JsonError(JsonRejection),
    /// Form parsing failed.
    FormError(FormRejection),
    /// Validation failed.
    ValidationError(validator::ValidationErrors),
}

fn describe(errors: &validator::ValidationErrors) -> String {
    let field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::JsonError(rejection) => (rejection.status(), rejection.body_text()),
            Self::FormError(rejection) => (rejection.status(), rejection.body_text()),
            Self::ValidationError(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ErrorBody::new(detail))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidationRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::FormError)?;

        value
            .validate()
            .map_err(ValidationRejection::ValidationError)?;

        Ok(ValidatedForm(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        age: u32,
    }

    async fn json_handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn form_handler(ValidatedForm(_body): ValidatedForm<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/json", post(json_handler))
            .route("/form", post(form_handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/json")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/form")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let resp = send(json_request(r#"{"name": "Alice", "age": 30}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(json_request("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        let resp = send(json_request(r#"{"name": "", "age": 0}"#)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn valid_form_returns_ok() {
        let resp = send(form_request("name=Alice&age=30")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn form_validation_failure_returns_422() {
        let resp = send(form_request("name=&age=30")).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
