//! Domain layer: entities and the pure logic of the bio page.
//!
//! Nothing in this layer performs I/O. Every operation borrows its input and
//! returns a new value.
//!
//! # Architecture
//!
//! - [`entities`] - Posts, settings and the click ledger
//! - [`posts`] - Add / update / delete / publish / unpublish / track-click
//! - [`stats`] - Summary counters derived from posts
//! - [`reducer`] - `(state, action) -> state'` over the whole page
//! - [`repositories`] - Key-value store contract implemented by infrastructure

pub mod entities;
pub mod posts;
pub mod reducer;
pub mod repositories;
pub mod stats;
