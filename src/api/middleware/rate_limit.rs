//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits are keyed by client IP. Behind a trusted reverse proxy the IP is
//! read from `X-Forwarded-For` / `X-Real-IP`; otherwise from the socket peer
//! address, which requires serving with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public page and click redirects: 2 req/s, burst 100.
pub const PUBLIC: Limits = Limits {
    per_second: 2,
    burst_size: 100,
};

/// Admin API: 1 req/s, burst 10.
pub const ADMIN: Limits = Limits {
    per_second: 1,
    burst_size: 10,
};

/// Wraps `router` in a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn apply(router: Router<AppState>, limits: Limits, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        let config = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limit values are non-zero");
        router.layer(GovernorLayer::new(Arc::new(config)))
    } else {
        let config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limit values are non-zero");
        router.layer(GovernorLayer::new(Arc::new(config)))
    }
}
