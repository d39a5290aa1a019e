//! JSON pretty-printing for API requests and responses

use serde::Serialize;
use serde_json::Value;

/// Pretty-print a JSON value with two-space indentation.
///
/// Falls back to compact output if pretty serialization fails.
pub fn format_json(value: &Value) -> String {
    to_pretty(value)
}

/// Pretty-print any serializable value, e.g. a request body.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!("Error formatting JSON: {}", e);
        serde_json::to_string(value).unwrap_or_default()
    })
}

/// Pretty-print JSON text, or return it unchanged if it does not parse.
pub fn format_json_str(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => format_json(&value),
        Err(e) => {
            tracing::debug!("Not JSON, leaving as is: {}", e);
            text.to_string()
        }
    }
}
