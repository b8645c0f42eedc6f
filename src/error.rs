use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::fmt;

use crate::cors::CorsHeaders;

/// Response body message when PayEvo cannot be reached at all.
pub const UPSTREAM_UNREACHABLE_MESSAGE: &str = "Falha na comunicação com PayEvo";

#[derive(Debug)]
pub enum ProxyError {
    /// Request used a method the route does not serve
    MethodNotAllowed,
    /// PAYEVO_AUTH missing from the environment
    Configuration,
    /// Client input rejected before any upstream call
    BadRequest(String),
    /// PayEvo answered with a non-2xx status; relayed as-is
    Upstream {
        status: u16,
        message: String,
        details: serde_json::Value,
    },
    /// Transport failure talking to PayEvo
    Unreachable(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MethodNotAllowed => write!(f, "method not allowed"),
            ProxyError::Configuration => write!(f, "PAYEVO_AUTH not configured"),
            ProxyError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ProxyError::Upstream { status, message, .. } => {
                write!(f, "upstream error {}: {}", status, message)
            }
            ProxyError::Unreachable(msg) => write!(f, "upstream unreachable: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Render the `{error, details?}` envelope with CORS headers attached.
    pub fn to_response(&self, cors: &CorsHeaders) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status());
        cors.apply(&mut builder);

        match self {
            ProxyError::MethodNotAllowed => builder.json(serde_json::json!({
                "error": "Method not allowed"
            })),
            ProxyError::Configuration => builder.json(serde_json::json!({
                "error": "PAYEVO_AUTH not configured"
            })),
            ProxyError::BadRequest(msg) => builder.json(serde_json::json!({
                "error": msg
            })),
            ProxyError::Upstream { message, details, .. } => builder.json(serde_json::json!({
                "error": message,
                "details": details
            })),
            ProxyError::Unreachable(_) => builder.json(serde_json::json!({
                "error": UPSTREAM_UNREACHABLE_MESSAGE
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ProxyError::Configuration.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ProxyError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::Unreachable("connect refused".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_upstream_status_is_relayed() {
        let err = ProxyError::Upstream {
            status: 422,
            message: "rejected".to_string(),
            details: serde_json::Value::Null,
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Garbage status codes degrade to 502 instead of panicking
        let err = ProxyError::Upstream {
            status: 0,
            message: "rejected".to_string(),
            details: serde_json::Value::Null,
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
