use std::env;
use url::Url;

const DEFAULT_PAYEVO_ENDPOINT: &str = "https://apiv2.payevo.com.br/functions/v1/transactions";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RATE_LIMIT_RPM: u32 = 60;

#[derive(Clone)]
pub struct ProxyConfig {
    /// PayEvo transactions endpoint
    pub payevo_endpoint: String,
    /// Bearer credential for PayEvo (None = handlers answer 500)
    pub payevo_auth: Option<String>,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Server port
    pub port: u16,
    /// Rate limit requests per minute
    pub rate_limit_rpm: u32,
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("payevo_endpoint", &self.payevo_endpoint)
            .field(
                "payevo_auth",
                &self.payevo_auth.as_ref().map(|_| "[REDACTED]"),
            )
            .field("allowed_origins", &self.allowed_origins)
            .field("port", &self.port)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .finish()
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: upstream endpoint
        let payevo_endpoint =
            env::var("PAYEVO_ENDPOINT").unwrap_or_else(|_| DEFAULT_PAYEVO_ENDPOINT.to_string());
        // Validate URL
        Url::parse(&payevo_endpoint).map_err(|_| ConfigError::InvalidUrl(payevo_endpoint.clone()))?;

        // Credential: absence is a per-request 500, not a startup abort;
        // preflight and health must keep answering.
        let payevo_auth = env::var("PAYEVO_AUTH").ok().filter(|s| !s.is_empty());
        if payevo_auth.is_none() {
            tracing::warn!(
                "PAYEVO_AUTH is not set — payment routes will answer 500 until it is configured"
            );
        }

        // Optional: allowed origins (comma-separated, defaults to wildcard)
        let allowed_origins =
            parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: rate limit
        let rate_limit_rpm = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        Ok(Self {
            payevo_endpoint,
            payevo_auth,
            allowed_origins,
            port,
            rate_limit_rpm,
        })
    }
}

/// Split a comma-separated origin list, trimming entries and dropping empties.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
