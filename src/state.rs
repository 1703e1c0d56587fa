//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, BioService};
use crate::domain::repositories::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub bio_service: Arc<BioService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(bio_service: Arc<BioService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            bio_service,
            auth_service,
        }
    }

    /// Loads the bio state from `store` and wires the services around it.
    pub async fn from_store(store: Arc<dyn KeyValueStore>, admin_token: &str) -> Self {
        let bio_service = Arc::new(BioService::load(store).await);
        let auth_service = Arc::new(AuthService::new(admin_token));
        Self::new(bio_service, auth_service)
    }
}
