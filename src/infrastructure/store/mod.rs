//! Key-value store implementations.
//!
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for development, tests and fallback

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
