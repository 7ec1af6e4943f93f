pub mod item;
pub mod user;

pub use item::{CreateItemDto, Item, ItemRepositoryInterface};
pub use user::{CreateUserDto, User, UserRepositoryInterface};

pub use crate::shared::{DomainError, DomainResult};
