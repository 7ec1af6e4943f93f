//! HTTP request metrics middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// Records per request:
///
/// - `http_requests_total{method, path, status}`
/// - `http_request_duration_seconds{method, path}`
/// - `http_auth_rejections_total{path}` for 401 responses
///
/// `path` is the route template (`/items/{item_id}`), so ids do not blow up
/// label cardinality. Unmatched requests are grouped under `unmatched`.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        metrics::counter!("http_auth_rejections_total", "path" => path.clone()).increment(1);
    }

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed);

    response
}
