//! Request bodies for the Reframe API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message family a request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFamily {
    /// SWIFT MT (field-tagged) messages
    Mt,
    /// ISO 20022 (XML) messages
    Mx,
}

impl MessageFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            MessageFamily::Mt => "SWIFT MT",
            MessageFamily::Mx => "ISO 20022",
        }
    }

    /// Guess the family of a raw message: XML is MX, anything else MT
    pub fn detect(message: &str) -> Self {
        if message.trim_start().starts_with('<') {
            MessageFamily::Mx
        } else {
            MessageFamily::Mt
        }
    }
}

/// Body for `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub message_type: String,
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl GenerateRequest {
    /// Build the body the way each family expects it.
    ///
    /// MT generation sends `debug: false`; MX generation sends an empty
    /// `config` object, which the API requires for that family.
    pub fn new(
        family: MessageFamily,
        message_type: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        let (debug, config) = match family {
            MessageFamily::Mt => (Some(false), None),
            MessageFamily::Mx => (None, Some(Map::new())),
        };
        Self {
            message_type: message_type.into(),
            scenario: scenario.into(),
            debug,
            config,
        }
    }
}

/// Optional MX validation outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Include the canonical JSON rendition
    pub canonical: bool,
    /// Run business rules in addition to schema checks
    pub business_validation: bool,
}

/// Body for `POST /api/validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ValidateOptions>,
}

impl ValidateRequest {
    /// MT validation only has a debug switch; either extra output turns it on.
    pub fn mt(message: impl Into<String>, canonical: bool, business_validation: bool) -> Self {
        Self {
            message: message.into(),
            debug: Some(canonical || business_validation),
            options: None,
        }
    }

    pub fn mx(message: impl Into<String>, canonical: bool, business_validation: bool) -> Self {
        Self {
            message: message.into(),
            debug: None,
            options: Some(ValidateOptions {
                canonical,
                business_validation,
            }),
        }
    }

    pub fn for_family(
        family: MessageFamily,
        message: impl Into<String>,
        canonical: bool,
        business_validation: bool,
    ) -> Self {
        match family {
            MessageFamily::Mt => Self::mt(message, canonical, business_validation),
            MessageFamily::Mx => Self::mx(message, canonical, business_validation),
        }
    }
}

/// Body for `POST /api/transform`
///
/// The API detects the direction (MT to MX or back) from the message itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub message: String,
    pub validation: bool,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_family() {
        assert_eq!(
            MessageFamily::detect("  <?xml version=\"1.0\"?><Document/>"),
            MessageFamily::Mx
        );
        assert_eq!(
            MessageFamily::detect("{1:F01BANKBEBBAXXX0000000000}"),
            MessageFamily::Mt
        );
    }

    #[test]
    fn test_generate_body_per_family() {
        let mt = GenerateRequest::new(MessageFamily::Mt, "MT103", "standard");
        assert_eq!(
            serde_json::to_value(&mt).unwrap(),
            json!({"message_type": "MT103", "scenario": "standard", "debug": false})
        );

        let mx = GenerateRequest::new(MessageFamily::Mx, "pacs.008", "cbpr_stp_compliant");
        assert_eq!(
            serde_json::to_value(&mx).unwrap(),
            json!({"message_type": "pacs.008", "scenario": "cbpr_stp_compliant", "config": {}})
        );
    }

    #[test]
    fn test_validate_body_per_family() {
        let mt = ValidateRequest::mt("{1:F01BANK}", false, true);
        assert_eq!(
            serde_json::to_value(&mt).unwrap(),
            json!({"message": "{1:F01BANK}", "debug": true})
        );

        let mx = ValidateRequest::mx("<Document/>", true, false);
        assert_eq!(
            serde_json::to_value(&mx).unwrap(),
            json!({
                "message": "<Document/>",
                "options": {"canonical": true, "business_validation": false}
            })
        );
    }
}
