//! Database entities module

pub mod item;
pub mod user;

pub use item::Entity as Item;
pub use user::Entity as User;
