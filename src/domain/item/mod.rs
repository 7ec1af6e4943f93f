//! Item aggregate

pub mod model;
pub mod repository;

mod dto_create;

pub use model::Item;

pub use dto_create::CreateItemDto;

pub use repository::ItemRepositoryInterface;
