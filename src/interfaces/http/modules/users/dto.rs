//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::identity::NewUser;
use crate::domain::User;

/// User API representation. Never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64, message = "username must be 3–64 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 72, message = "password must be 8–72 characters"))]
    pub password: String,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
            email: r.email,
            full_name: r.full_name,
        }
    }
}
