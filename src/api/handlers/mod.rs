//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod posts;
pub mod redirect;
pub mod settings;
pub mod stats;

pub use health::health_handler;
pub use posts::{
    create_post_handler, delete_post_handler, list_posts_handler, publish_post_handler,
    track_click_handler, unpublish_post_handler, update_post_handler,
};
pub use redirect::redirect_handler;
pub use settings::{get_settings_handler, update_settings_handler};
pub use stats::{analytics_handler, stats_handler};
