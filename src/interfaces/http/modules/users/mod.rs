//! Users module: registration, profile and lookups

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
