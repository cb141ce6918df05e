use serde_json::Value;

use super::error::ConversionError;
use super::types::RemoteErrorBody;

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Message for a non-success response: `error`, then `detail`, then the status code.
pub(super) fn remote_error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<RemoteErrorBody>(body).unwrap_or_default();
    non_empty_string(parsed.error.as_ref())
        .or_else(|| non_empty_string(parsed.detail.as_ref()))
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

/// Re-serialize a success body as 2-space indented JSON text.
pub(super) fn pretty_json(body: &str) -> Result<String, ConversionError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ConversionError::malformed_response(format!("Failed to parse response JSON: {}", e))
    })?;
    serde_json::to_string_pretty(&value).map_err(|e| {
        ConversionError::malformed_response(format!("Failed to serialize response JSON: {}", e))
    })
}

pub(super) fn health_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| non_empty_string(v.get("message")))
        .unwrap_or_else(|| body.trim().to_string())
}
