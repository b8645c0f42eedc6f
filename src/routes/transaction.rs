use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::cors::request_origin;
use crate::error::ProxyError;
use crate::metrics::LOOKUPS_TOTAL;
use crate::relay::{self, UpstreamReply};
use crate::state::AppState;
use crate::validation::{resolve_transaction_id, ERR_MISSING_ID};

const ALLOW_METHODS: &str = "GET, OPTIONS";

#[derive(Debug, Deserialize)]
struct LookupQuery {
    id: Option<String>,
}

/// GET /consultar-transacao — relay a transaction status lookup.
///
/// Accepts the id either as `?id=` or as a trailing path segment
/// (`/consultar-transacao/{id}`); the query parameter wins.
pub async fn consultar_transacao(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let cors = state.cors.resolve(request_origin(&req), ALLOW_METHODS);

    if req.method() == Method::OPTIONS {
        return cors.preflight();
    }

    match handle(&req, &state).await {
        Ok(reply) => {
            LOOKUPS_TOTAL.inc();
            let mut builder = HttpResponse::build(reply.status);
            cors.apply(&mut builder);
            builder.json(reply.body)
        }
        Err(e) => e.to_response(&cors),
    }
}

async fn handle(req: &HttpRequest, state: &AppState) -> Result<UpstreamReply, ProxyError> {
    if req.method() != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }

    let auth = state
        .config
        .payevo_auth
        .as_deref()
        .ok_or(ProxyError::Configuration)?;

    let query_id = web::Query::<LookupQuery>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().id);
    let transaction_id = resolve_transaction_id(query_id.as_deref(), req.match_info().get("id"))
        .ok_or_else(|| ProxyError::BadRequest(ERR_MISSING_ID.to_string()))?;

    relay::lookup_transaction(&state.http_client, &state.config, auth, &transaction_id).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/consultar-transacao", web::to(consultar_transacao))
        .route("/consultar-transacao/{id:.*}", web::to(consultar_transacao));
}
