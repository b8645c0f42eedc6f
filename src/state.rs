use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::cors::CorsPolicy;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub cors: CorsPolicy,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        let cors = CorsPolicy::new(config.allowed_origins.clone());
        Self {
            config: Arc::new(config),
            cors,
            // No explicit timeout: a single upstream call per request,
            // platform defaults only.
            http_client: reqwest::Client::new(),
        }
    }
}
