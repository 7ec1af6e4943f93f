use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    /// Failed authentication. The message is safe to show to the caller.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Inactive User")]
    InactiveUser,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    /// Whether the failure is internal and must not be echoed back verbatim.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Storage(_) | DomainError::Crypto(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
