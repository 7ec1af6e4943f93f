//! Identity module: user management and authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, token resolution, registration and lookups.

pub mod service;

pub use service::{AccessToken, NewUser, UserService, INVALID_CREDENTIALS, INVALID_LOGIN};
