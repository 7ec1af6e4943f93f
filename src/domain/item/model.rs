use chrono::{DateTime, Utc};

/// Item owned by a user
#[derive(Clone, Debug)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}
