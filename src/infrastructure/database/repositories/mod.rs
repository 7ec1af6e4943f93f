//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod item_repository;
pub mod user_repository;

pub use item_repository::ItemRepository;
pub use user_repository::UserRepository;
