use chrono::{DateTime, Utc};

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub hashed_password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
