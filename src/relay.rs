//! Upstream client: one PayEvo call per request, response relayed as-is.

use actix_web::http::StatusCode;
use reqwest::header;
use serde_json::Value;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::metrics::UPSTREAM_FAILURES;
use crate::types::ChargePayload;

const ERR_CHARGE_FALLBACK: &str = "Erro ao gerar PIX";
const ERR_LOOKUP_FALLBACK: &str = "Erro ao consultar transação";

/// A 2xx answer from PayEvo, relayed verbatim to the caller.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

/// POST the normalized charge payload to the transactions endpoint.
pub async fn create_charge(
    client: &reqwest::Client,
    config: &ProxyConfig,
    auth: &str,
    payload: &ChargePayload,
) -> Result<UpstreamReply, ProxyError> {
    let result = client
        .post(&config.payevo_endpoint)
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, auth)
        .json(payload)
        .send()
        .await;

    relay(result, ERR_CHARGE_FALLBACK).await
}

/// GET `{endpoint}/{transaction_id}`.
pub async fn lookup_transaction(
    client: &reqwest::Client,
    config: &ProxyConfig,
    auth: &str,
    transaction_id: &str,
) -> Result<UpstreamReply, ProxyError> {
    let url = format!("{}/{}", config.payevo_endpoint, transaction_id);
    let result = client
        .get(&url)
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, auth)
        .send()
        .await;

    relay(result, ERR_LOOKUP_FALLBACK).await
}

/// Shared relay policy for both routes: 2xx bodies pass through with the
/// upstream status; non-2xx becomes `{error, details}` keeping the upstream
/// status; transport failures become 502. An unparsable upstream body is
/// relayed as null rather than failing the request.
async fn relay(
    result: Result<reqwest::Response, reqwest::Error>,
    fallback: &str,
) -> Result<UpstreamReply, ProxyError> {
    let response = result.map_err(|e| {
        UPSTREAM_FAILURES.inc();
        tracing::error!(error = %e, "request to PayEvo failed");
        ProxyError::Unreachable(e.to_string())
    })?;

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        Ok(UpstreamReply {
            status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK),
            body,
        })
    } else {
        tracing::warn!(status = status.as_u16(), "PayEvo rejected the request");
        Err(ProxyError::Upstream {
            status: status.as_u16(),
            message: error_message(&body, fallback),
            details: body,
        })
    }
}

/// Prefer the upstream's own `message`; fall back to the operation message.
fn error_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_upstream_message() {
        let body = json!({ "message": "saldo insuficiente", "code": 17 });
        assert_eq!(error_message(&body, ERR_CHARGE_FALLBACK), "saldo insuficiente");
    }

    #[test]
    fn test_error_message_falls_back_when_absent_or_unparsable() {
        assert_eq!(error_message(&Value::Null, ERR_CHARGE_FALLBACK), ERR_CHARGE_FALLBACK);
        assert_eq!(
            error_message(&json!({ "message": 42 }), ERR_LOOKUP_FALLBACK),
            ERR_LOOKUP_FALLBACK
        );
    }
}
