//! OAuth2 password-grant token endpoint

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
