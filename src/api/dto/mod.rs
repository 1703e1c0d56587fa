//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use Serde for JSON deserialization and validator for input
//! validation. Responses mostly serialize domain types directly.

pub mod health;
pub mod post;
pub mod settings;
