pub mod auth;
pub mod health;
pub mod info;
pub mod items;
pub mod metrics;
pub mod request_id;
pub mod users;
