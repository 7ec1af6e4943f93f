//! Password hashing and access-token signing

pub mod jwt;
pub mod password;

pub use jwt::{create_access_token, verify_token, JwtConfig, TokenClaims, TokenError};
pub use password::{hash_password, verify_password};
