use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: expected {expected}")]
    UnexpectedShape { expected: &'static str },
}

/// Field holding the items of a collection response.
const LIST_FIELD: &str = "list";

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: String,
}

pub fn decode_json_response(body: &[u8]) -> Result<Value, TransportError> {
    Ok(serde_json::from_slice(body)?)
}

/// Extract the `list` field of a collection response.
///
/// A missing or `null` field yields an empty list; pagination metadata next to
/// it is discarded.
pub fn decode_list_envelope(value: Value) -> Result<Vec<Value>, TransportError> {
    let Value::Object(mut fields) = value else {
        return Err(TransportError::UnexpectedShape {
            expected: "JSON object with a `list` field",
        });
    };

    match fields.remove(LIST_FIELD) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(TransportError::UnexpectedShape {
            expected: "`list` field to be an array",
        }),
    }
}

/// Human-readable message for a failed call.
///
/// Prefers `error.message` from a JSON error envelope, then the raw body text,
/// then `HTTP <status>`.
pub fn decode_error_message(status: u16, body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {status}")
    } else {
        text.to_owned()
    }
}
