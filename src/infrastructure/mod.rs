//! Infrastructure layer for external integrations.
//!
//! Implements the persistence contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Key-value stores (Redis and in-memory)

pub mod store;
