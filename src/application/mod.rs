pub mod identity;
pub mod items;

pub use identity::{AccessToken, NewUser, UserService};
pub use items::{ItemService, NewItem};
