//! Per-owner item use-cases

pub mod service;

pub use service::{ItemService, NewItem};
