use serde_json::{Map, Value};

use crate::error::ProxyError;
use crate::types::{ChargePayload, ChargeRequest, DocumentInput};

pub const ERR_INVALID_JSON: &str = "Invalid JSON body";
pub const ERR_NO_ITEMS: &str = "Nenhum item informado";
pub const ERR_INVALID_AMOUNT: &str = "Valor total inválido";
pub const ERR_INCOMPLETE_CUSTOMER: &str = "Dados do cliente incompletos";
pub const ERR_MISSING_ID: &str = "Parâmetro 'id' obrigatório";

const DEFAULT_DOCUMENT_TYPE: &str = "CPF";

/// Keep only ASCII digits; `None` when the value is not a string.
pub fn sanitize_digits(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(|s| s.chars().filter(|c| c.is_ascii_digit()).collect())
}

/// Parse and validate a raw request body into the normalized PayEvo payload.
pub fn parse_charge(body: &[u8]) -> Result<ChargePayload, ProxyError> {
    let request: ChargeRequest = serde_json::from_slice(body)
        .map_err(|_| ProxyError::BadRequest(ERR_INVALID_JSON.to_string()))?;
    validate_charge(request)
}

/// Validation order is part of the route contract: items, then amount,
/// then customer completeness.
pub fn validate_charge(request: ChargeRequest) -> Result<ChargePayload, ProxyError> {
    let items = match request.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ProxyError::BadRequest(ERR_NO_ITEMS.to_string())),
    };

    let amount = match request.amount {
        Some(value) if value.as_f64().map(|n| n > 0.0).unwrap_or(false) => value,
        _ => return Err(ProxyError::BadRequest(ERR_INVALID_AMOUNT.to_string())),
    };

    let customer = request
        .customer
        .ok_or_else(|| ProxyError::BadRequest(ERR_INCOMPLETE_CUSTOMER.to_string()))?;

    let phone = customer.phone.as_ref().and_then(sanitize_digits);

    let name = customer.name.filter(|s| !s.is_empty());
    let email = customer.email.filter(|s| !s.is_empty());
    let document = customer.document.filter(|d| d.is_usable());
    let (name, email, document) = match (name, email, document) {
        (Some(name), Some(email), Some(document)) => (name, email, document),
        _ => return Err(ProxyError::BadRequest(ERR_INCOMPLETE_CUSTOMER.to_string())),
    };

    let (number, doc_type) = match document {
        DocumentInput::Typed { number, doc_type } => (
            number.as_ref().and_then(sanitize_digits),
            doc_type.unwrap_or_else(|| DEFAULT_DOCUMENT_TYPE.to_string()),
        ),
        DocumentInput::Raw(value) => (sanitize_digits(&value), DEFAULT_DOCUMENT_TYPE.to_string()),
    };

    let mut normalized = customer.extra;
    normalized.insert("name".to_string(), Value::String(name));
    normalized.insert("email".to_string(), Value::String(email));
    if let Some(digits) = phone {
        normalized.insert("phone".to_string(), Value::String(digits));
    }

    let mut normalized_document = Map::new();
    if let Some(number) = number {
        normalized_document.insert("number".to_string(), Value::String(number));
    }
    normalized_document.insert("type".to_string(), Value::String(doc_type));
    normalized.insert("document".to_string(), Value::Object(normalized_document));

    Ok(ChargePayload {
        items,
        payment_method: request.payment_method,
        pix: request.pix,
        amount,
        customer: Value::Object(normalized),
    })
}

/// Pick the transaction id: query parameter wins, then the trailing path
/// segment; empty values count as absent.
pub fn resolve_transaction_id(query_id: Option<&str>, path_id: Option<&str>) -> Option<String> {
    if let Some(id) = query_id.filter(|s| !s.is_empty()) {
        return Some(id.to_string());
    }
    path_id
        .map(|s| s.trim_start_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
