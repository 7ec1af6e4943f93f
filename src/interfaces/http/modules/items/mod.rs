//! Items module: the caller's own items

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
