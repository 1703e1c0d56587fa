//! Core domain entities of the bio page.
//!
//! # Entity Types
//!
//! - [`Post`] - A curatable item with display fields, status and click counter
//! - [`Settings`] - Page-level title, description and colors
//! - [`Analytics`] - Per-post click ledger stored next to the posts
//!
//! Creation and partial updates go through [`NewPost`] and [`PostPatch`],
//! never through direct field mutation.

pub mod analytics;
pub mod post;
pub mod settings;

pub use analytics::Analytics;
pub use post::{
    CAPTION_FIELD, LINK_URL_FIELD, MEDIA_URL_FIELD, NewPost, Post, PostId, PostPatch, PostStatus,
};
pub use settings::Settings;
