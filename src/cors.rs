//! CORS header resolution for the payment routes.
//!
//! The allow-origin rule follows the contract the web clients depend on:
//! a wildcard allow-list always resolves to `*`; otherwise a listed request
//! origin is echoed back, and anything else falls back to the first
//! configured origin. Headers are attached to every response, errors
//! included, so the resolver lives here instead of behind middleware.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};

/// Fixed set of request headers accepted on cross-origin calls.
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

/// Resolved header set for one request. Resolution is total: there is
/// no error path.
#[derive(Debug)]
pub struct CorsHeaders {
    pub allow_origin: String,
    pub allow_methods: &'static str,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    pub fn resolve(&self, origin: Option<&str>, allow_methods: &'static str) -> CorsHeaders {
        let allow_all = self.allowed_origins.iter().any(|o| o == "*");

        let allow_origin = if allow_all {
            "*".to_string()
        } else {
            match origin {
                Some(o) if self.allowed_origins.iter().any(|a| a == o) => o.to_string(),
                _ => self
                    .allowed_origins
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "*".to_string()),
            }
        };

        CorsHeaders {
            allow_origin,
            allow_methods,
        }
    }
}

impl CorsHeaders {
    pub fn apply(&self, builder: &mut HttpResponseBuilder) {
        builder
            .insert_header((
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin.as_str(),
            ))
            .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS))
            .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods))
            .insert_header((header::VARY, "Origin"));
    }

    /// 204 preflight answer: headers only, no body, no validation.
    pub fn preflight(&self) -> HttpResponse {
        let mut builder = HttpResponse::NoContent();
        self.apply(&mut builder);
        builder.finish()
    }
}

/// Extract the request's Origin header, if readable.
pub fn request_origin(req: &HttpRequest) -> Option<&str> {
    req.headers().get(header::ORIGIN)?.to_str().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(origins: &[&str]) -> CorsPolicy {
        CorsPolicy::new(origins.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_wildcard_list_always_resolves_wildcard() {
        let p = policy(&["*"]);
        assert_eq!(p.resolve(None, "POST, OPTIONS").allow_origin, "*");
        assert_eq!(
            p.resolve(Some("https://evil.example"), "POST, OPTIONS")
                .allow_origin,
            "*"
        );

        // Wildcard wins even when mixed with explicit origins
        let p = policy(&["https://a.example", "*"]);
        assert_eq!(
            p.resolve(Some("https://a.example"), "GET, OPTIONS").allow_origin,
            "*"
        );
    }

    #[test]
    fn test_listed_origin_is_echoed() {
        let p = policy(&["https://a.example", "https://b.example"]);
        let headers = p.resolve(Some("https://b.example"), "POST, OPTIONS");
        assert_eq!(headers.allow_origin, "https://b.example");
    }

    #[test]
    fn test_unlisted_or_absent_origin_falls_back_to_first() {
        let p = policy(&["https://a.example", "https://b.example"]);
        assert_eq!(
            p.resolve(Some("https://evil.example"), "POST, OPTIONS")
                .allow_origin,
            "https://a.example"
        );
        assert_eq!(p.resolve(None, "POST, OPTIONS").allow_origin, "https://a.example");
    }

    #[test]
    fn test_empty_list_resolves_wildcard() {
        let p = policy(&[]);
        assert_eq!(p.resolve(Some("https://a.example"), "GET, OPTIONS").allow_origin, "*");
    }

    #[test]
    fn test_methods_are_route_specific() {
        let p = policy(&["*"]);
        assert_eq!(p.resolve(None, "GET, OPTIONS").allow_methods, "GET, OPTIONS");
        assert_eq!(p.resolve(None, "POST, OPTIONS").allow_methods, "POST, OPTIONS");
    }
}
