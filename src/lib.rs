//! # linkbio
//!
//! A single-operator "link in bio" page: curate posts, publish a subset to a
//! public page, and count clicks.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and pure operations (posts, stats, reducer)
//! - **Application Layer** ([`application`]) - State ownership and persistence orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory key-value stores
//! - **API Layer** ([`api`]) - Admin REST API, DTOs and middleware
//! - **Web Layer** ([`web`]) - Public bio page
//!
//! ## Quick Start
//!
//! ```bash
//! export ADMIN_TOKEN="a-long-random-operator-token"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, BioService};
    pub use crate::domain::entities::{
        Analytics, NewPost, Post, PostId, PostPatch, PostStatus, Settings,
    };
    pub use crate::domain::posts::{
        add_post, delete_post, publish_post, track_click, unpublish_post, update_post,
    };
    pub use crate::domain::reducer::{Action, BioState, reduce};
    pub use crate::domain::stats::{StatsSummary, compute_stats};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::html::escape_html;
}
