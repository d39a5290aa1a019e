//! Response handling for the Reframe API
//!
//! Response bodies are kept as loose JSON: the API's schema belongs to the
//! API, and the sandbox only digs out the few fields it displays.

use serde::Serialize;
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

use crate::error::SandboxError;
use crate::json::format_json;
use crate::result::Result;

/// Shown when validation fails without any listed errors
pub const GENERIC_VALIDATION_FAILURE: &str =
    "The message validation failed but no specific errors were provided.";

/// HTTP status plus JSON body of an API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Build from raw response text; non-JSON text becomes `{"message": text}`
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }));
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `success` flag, when the API sent one
    pub fn success(&self) -> Option<bool> {
        self.body.get("success").and_then(Value::as_bool)
    }

    /// The message payload: `result`, else `transformed_message`, else `message`.
    ///
    /// A `result` array (multi-part transformations) is concatenated.
    pub fn message_text(&self) -> Option<String> {
        if let Some(Value::Array(parts)) = self.body.get("result") {
            let joined: String = parts.iter().map(display_value).collect();
            if !joined.is_empty() {
                return Some(joined);
            }
        }

        ["result", "transformed_message", "message"]
            .iter()
            .find_map(|key| self.field_text(key))
    }

    /// Error text from `error`, else `message`
    pub fn error_message(&self) -> Option<String> {
        self.field_text("error").or_else(|| self.field_text("message"))
    }

    /// Fail with [`SandboxError::Api`] on a non-2xx status
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success_status() {
            return Ok(self);
        }
        Err(SandboxError::Api {
            status: self.status,
            message: self
                .error_message()
                .unwrap_or_else(|| format!("HTTP error! status: {}", self.status)),
        })
    }

    /// Fail with [`SandboxError::TransformFailed`] when `success` is false
    pub fn error_for_failure(self) -> Result<Self> {
        if self.success() == Some(false) {
            return Err(SandboxError::TransformFailed {
                message: self
                    .error_message()
                    .unwrap_or_else(|| "the API reported success: false".to_string()),
            });
        }
        Ok(self)
    }

    /// Interpret the body as a validation report
    pub fn verdict(&self) -> ValidationVerdict {
        if self.success() == Some(true) {
            return ValidationVerdict::Valid;
        }

        let issues: Vec<ValidationIssue> = match self.body.get("errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(errors)) => errors.iter().map(ValidationIssue::from_value).collect(),
            Some(single) => vec![ValidationIssue::from_value(single)],
        };

        let summary = if issues.is_empty() {
            Some(
                self.field_text("message")
                    .unwrap_or_else(|| GENERIC_VALIDATION_FAILURE.to_string()),
            )
        } else {
            None
        };

        ValidationVerdict::Invalid { issues, summary }
    }

    /// Two-space pretty-printed body
    pub fn pretty(&self) -> String {
        format_json(&self.body)
    }

    fn field_text(&self, key: &str) -> Option<String> {
        self.body.get(key).and_then(truthy_text)
    }
}

/// Outcome of a validation call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationVerdict {
    Valid,
    Invalid {
        issues: Vec<ValidationIssue>,
        /// Set when there are no issues to explain the failure
        summary: Option<String>,
    },
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }
}

/// `field_tag: "52A"` embedded in an MT validator message
static FIELD_TAG_IN_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"field_tag:\s*"([^"]+)""#).unwrap());

/// One validation error, flattened from whatever shape the API sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    pub error_type: String,
    pub code: Option<String>,
    pub location: Option<String>,
    pub field: Option<String>,
    pub field_tag: Option<String>,
    pub field_type: Option<String>,
    pub field_name: Option<String>,
    pub position: Option<String>,
}

impl ValidationIssue {
    /// Plain strings become the message; objects are searched for
    /// `message`, `error` or `description`, falling back to the raw JSON.
    pub fn from_value(value: &Value) -> Self {
        let get = |key: &str| value.get(key).and_then(truthy_text);

        let message = match value {
            Value::String(s) => s.clone(),
            _ => get("message")
                .or_else(|| get("error"))
                .or_else(|| get("description"))
                .unwrap_or_else(|| value.to_string()),
        };
        let code = get("code");
        let field_tag = get("field_tag")
            .or_else(|| get("tag"))
            .or_else(|| field_tag_in(&message));

        Self {
            message,
            error_type: get("error_type")
                .or_else(|| code.clone())
                .unwrap_or_else(|| "Validation Error".to_string()),
            code,
            location: get("location"),
            field: get("field"),
            field_tag,
            field_type: get("field_type"),
            field_name: get("field_name"),
            position: get("position"),
        }
    }

    /// `"<type> (<code>)"`, or just the type when there is no code
    pub fn headline(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({})", self.error_type, code),
            None => self.error_type.clone(),
        }
    }

    /// Labelled location details that are present
    pub fn details(&self) -> Vec<(&'static str, &str)> {
        [
            ("Location", &self.location),
            ("Field", &self.field),
            ("Field Tag", &self.field_tag),
            ("Field Type", &self.field_type),
            ("Field Name", &self.field_name),
            ("Position", &self.position),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// Text of a JSON value if it is "truthy": non-empty strings, non-zero
/// numbers, `true`, and any object or array.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(display_value(other)),
    }
}

fn field_tag_in(message: &str) -> Option<String> {
    FIELD_TAG_IN_MESSAGE
        .captures(message)
        .map(|caps| caps[1].to_string())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
