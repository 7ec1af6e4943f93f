//! Password hashing utilities

use bcrypt::{hash, verify};

/// bcrypt only looks at the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Cost bounds accepted by bcrypt (mirrors the crate's private constants).
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hash a password using bcrypt with the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}
