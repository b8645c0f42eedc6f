pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod relay;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;

pub use config::ProxyConfig;
pub use cors::CorsPolicy;
pub use error::ProxyError;
pub use state::AppState;
