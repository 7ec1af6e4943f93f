//! HTTP REST API interfaces
//!
//! - `common`: Error bodies and validating extractors
//! - `middleware`: Bearer token authentication
//! - `modules`: Request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
