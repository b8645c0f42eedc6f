use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pix_gateway::metrics::{register_metrics, track_requests};
use pix_gateway::{config::ProxyConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ProxyConfig::from_env().expect("Failed to load configuration");
    let port = config.port;
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Starting pix-gateway on port {}", port);
    tracing::info!("PayEvo endpoint: {}", config.payevo_endpoint);
    tracing::info!("Allowed origins: {:?}", config.allowed_origins);
    tracing::info!(
        "Credential: {}",
        if config.payevo_auth.is_some() {
            "configured"
        } else {
            "missing"
        }
    );

    // Register Prometheus metrics
    register_metrics();

    // Create shared state
    let state = AppState::new(config);
    let state_data = web::Data::new(state);

    // Configure rate limiter
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm as u64)
        .finish()
        .expect("Failed to create rate limiter config");

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(Logger::default())
            .wrap(from_fn(track_requests))
            .wrap(Governor::new(&governor_conf))
            .configure(routes::health::configure)
            .configure(routes::charge::configure)
            .configure(routes::transaction::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
