//! User management service
//!
//! Login, token resolution and user creation live here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface};
use crate::infrastructure::crypto::jwt::{create_access_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
use crate::shared::PageParams;

pub const INVALID_LOGIN: &str = "Incorrect username or password";
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// Verified against when the username is unknown, so a miss costs one bcrypt
/// round like a hit does.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Issued access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Input for [`UserService::create_user`]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Orchestrates the identity use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
    dummy_hash: OnceLock<String>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            jwt_config,
            bcrypt_cost,
            dummy_hash: OnceLock::new(),
        }
    }

    fn dummy_hash(&self) -> &str {
        self.dummy_hash.get_or_init(|| {
            hash_password(DUMMY_PASSWORD, self.bcrypt_cost).unwrap_or_else(|e| {
                warn!("Failed to prepare dummy password hash: {}", e);
                String::new()
            })
        })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Look the user up and check the password. `None` on unknown user or
    /// wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Option<User>> {
        let Some(user) = self.repo.get_user_by_username(username).await? else {
            let _ = verify_password(password, self.dummy_hash());
            return Ok(None);
        };

        let valid = match verify_password(password, &user.hashed_password) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = user.id, "Stored password hash is unusable: {}", e);
                false
            }
        };

        Ok(valid.then_some(user))
    }

    /// Authenticate and issue a token with the configured lifetime.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AccessToken> {
        let Some(user) = self.authenticate(username, password).await? else {
            debug!(username, "Login rejected");
            return Err(DomainError::Unauthorized(INVALID_LOGIN.into()));
        };

        let expires = self
            .jwt_config
            .access_token_expires()
            .map_err(|e| DomainError::Crypto(format!("Failed to create token: {}", e)))?;
        let access_token = create_access_token(&user.username, Some(expires), &self.jwt_config)
            .map_err(|e| DomainError::Crypto(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, "User logged in");
        Ok(AccessToken {
            access_token,
            token_type: "bearer".into(),
            expires_in: expires.num_seconds(),
        })
    }

    /// Resolve a bearer token to an active user.
    pub async fn current_user(&self, token: &str) -> DomainResult<User> {
        let username = verify_token(token, &self.jwt_config).map_err(|e| {
            debug!("Token rejected: {}", e);
            DomainError::Unauthorized(INVALID_CREDENTIALS.into())
        })?;

        let user = self
            .repo
            .get_user_by_username(&username)
            .await?
            .ok_or_else(|| DomainError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        if !user.is_active {
            return Err(DomainError::InactiveUser);
        }

        Ok(user)
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        if new_user.password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        if self
            .repo
            .get_user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("Username already registered".into()));
        }

        let hashed_password = hash_password(&new_user.password, self.bcrypt_cost)
            .map_err(|e| DomainError::Crypto(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: new_user.username,
                email: new_user.email,
                full_name: new_user.full_name,
                hashed_password,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, page: PageParams) -> DomainResult<Vec<User>> {
        self.repo.list_users(page).await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    pub async fn count_users(&self) -> DomainResult<u64> {
        self.repo.count_users().await
    }
}
