//! Query and path extractors whose rejections are [`ApiError`]s
//!
//! Axum's stock `Query` and `Path` reject with plain-text bodies. These
//! wrappers keep the `{"detail": ...}` shape for malformed query strings
//! and path segments.

use axum::extract::FromRequestParts;

use super::ApiError;

/// `axum::extract::Query` with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
