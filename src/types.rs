use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound charge request.
///
/// Deliberately lenient: shape problems must surface as this service's own
/// validation messages (see `validation`), not as serde rejections, so the
/// checked fields are loosely typed and unknown customer fields pass through.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    #[serde(default)]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub customer: Option<CustomerInput>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default = "default_pix")]
    pub pix: Value,
}

fn default_payment_method() -> String {
    "PIX".to_string()
}

fn default_pix() -> Value {
    serde_json::json!({ "expiresInDays": 30 })
}

#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub document: Option<DocumentInput>,
    /// Anything else the caller sent is forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Customer document: either the raw identifier or a `{number, type}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DocumentInput {
    Typed {
        #[serde(default)]
        number: Option<Value>,
        #[serde(rename = "type", default)]
        doc_type: Option<String>,
    },
    Raw(Value),
}

impl DocumentInput {
    /// An object document always counts as present; a raw value counts
    /// unless it is null, false, zero, or an empty string.
    pub fn is_usable(&self) -> bool {
        match self {
            DocumentInput::Typed { .. } => true,
            DocumentInput::Raw(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().map(|x| x != 0.0).unwrap_or(true),
                Value::String(s) => !s.is_empty(),
                _ => true,
            },
        }
    }
}

/// Normalized payload forwarded to PayEvo.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePayload {
    pub items: Vec<Value>,
    pub payment_method: String,
    pub pix: Value,
    pub amount: Value,
    pub customer: Value,
}
