//! Utility functions shared by the core and the presentation layers.
//!
//! - [`html`] - Escaping of user-supplied values for embedding in markup
//! - [`link_url`] - Validation and normalization of post destination URLs

pub mod html;
pub mod link_url;
