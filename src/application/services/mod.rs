//! Business logic services for the application layer.

pub mod auth_service;
pub mod bio_service;

pub use auth_service::AuthService;
pub use bio_service::{BioService, require_post};
