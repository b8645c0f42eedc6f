use actix_web::http::Method;
use actix_web::web::Bytes;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::cors::request_origin;
use crate::error::ProxyError;
use crate::metrics::CHARGES_CREATED;
use crate::relay::{self, UpstreamReply};
use crate::state::AppState;
use crate::validation;

const ALLOW_METHODS: &str = "POST, OPTIONS";

/// POST /gerar-pix — validate, normalize and forward a PIX charge.
///
/// The route is registered without a method guard so that the ordering
/// contract holds: preflight answers before anything else, and a wrong
/// method still gets a JSON 405 with CORS headers.
pub async fn gerar_pix(
    req: HttpRequest,
    body: Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let cors = state.cors.resolve(request_origin(&req), ALLOW_METHODS);

    if req.method() == Method::OPTIONS {
        return cors.preflight();
    }

    match handle(&req, &body, &state).await {
        Ok(reply) => {
            CHARGES_CREATED.inc();
            let mut builder = HttpResponse::build(reply.status);
            cors.apply(&mut builder);
            builder.json(reply.body)
        }
        Err(e) => e.to_response(&cors),
    }
}

async fn handle(
    req: &HttpRequest,
    body: &Bytes,
    state: &AppState,
) -> Result<UpstreamReply, ProxyError> {
    if req.method() != Method::POST {
        return Err(ProxyError::MethodNotAllowed);
    }

    let auth = state
        .config
        .payevo_auth
        .as_deref()
        .ok_or(ProxyError::Configuration)?;

    let payload = validation::parse_charge(body)?;

    relay::create_charge(&state.http_client, &state.config, auth, &payload).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/gerar-pix", web::to(gerar_pix));
}
