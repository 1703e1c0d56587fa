//! Application layer services.
//!
//! Services sit between the presentation layers and the pure domain core:
//! they hold the current state, feed actions through the reducer and
//! persist the result.
//!
//! # Available Services
//!
//! - [`services::bio_service::BioService`] - Posts, settings, analytics and stats

pub mod services;
