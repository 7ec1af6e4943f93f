//! Request ID middleware
//!
//! Every request gets an `X-Request-Id` (the caller's, or a fresh UUID v4).
//! The id is put on a `tracing` span wrapping the request and echoed back in
//! the response headers.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for the request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is reused as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// New-type wrapper for the request ID, stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
