//! # Items API
//!
//! A small HTTP service with password login, bearer tokens, users and
//! the items each user owns.
//!
//! ## Architecture
//!
//! - **domain**: Entities and repository traits
//! - **application**: Identity and item services
//! - **infrastructure**: Password hashing, JWT, SeaORM persistence
//! - **interfaces**: Axum router, handlers and middleware
//! - **shared**: Error and pagination types, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::create_api_router;
