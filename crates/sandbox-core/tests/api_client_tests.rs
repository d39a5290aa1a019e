//! Reframe client tests against a mock API

use sandbox_core::{
    ApiConfig, GenerateRequest, MessageFamily, ReframeClient, SandboxError, TransformRequest,
    ValidateRequest, ValidationVerdict,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReframeClient {
    ReframeClient::new(ApiConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_generate_posts_family_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "message_type": "pacs.008",
            "scenario": "cbpr_stp",
            "config": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "<Document><Id>1</Id></Document>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate(&GenerateRequest::new(MessageFamily::Mx, "pacs.008", "cbpr_stp"))
        .await
        .unwrap();

    assert_eq!(
        response.message_text().as_deref(),
        Some("<Document><Id>1</Id></Document>")
    );
}

#[tokio::test]
async fn test_error_status_uses_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "Unknown scenario: nope"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&GenerateRequest::new(MessageFamily::Mt, "MT103", "nope"))
        .await
        .unwrap_err();

    match err {
        SandboxError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Unknown scenario: nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .validate(&ValidateRequest::mt("{1:F01BANK}", false, false))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error (status 503): Service Unavailable"
    );
}

#[tokio::test]
async fn test_validate_reports_issues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(body_json(json!({
            "message": "<Document/>",
            "options": {"canonical": false, "business_validation": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "errors": [{"code": "E001", "message": "Missing GrpHdr", "location": "/Document"}]
        })))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .validate(&ValidateRequest::mx("<Document/>", false, true))
        .await
        .unwrap();

    let ValidationVerdict::Invalid { issues, .. } = response.verdict() else {
        panic!("expected an invalid verdict");
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].headline(), "E001 (E001)");
    assert_eq!(issues[0].location.as_deref(), Some("/Document"));
}

#[tokio::test]
async fn test_transform_success_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transform"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Unsupported message type MT999"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .transform(&TransformRequest {
            message: "{1:F01BANK}{2:I999}".to_string(),
            validation: false,
            debug: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SandboxError::TransformFailed { .. }));
    assert!(err.to_string().contains("Unsupported message type MT999"));
}

#[tokio::test]
async fn test_transform_joins_multi_part_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transform"))
        .and(body_json(json!({"message": "<Document/>", "validation": true, "debug": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": ["{1:F01BANKBEBBAXXX}", "{2:I103BANKDEFFXXXX}"]
        })))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .transform(&TransformRequest {
            message: "<Document/>".to_string(),
            validation: true,
            debug: false,
        })
        .await
        .unwrap();

    assert_eq!(
        response.message_text().as_deref(),
        Some("{1:F01BANKBEBBAXXX}{2:I103BANKDEFFXXXX}")
    );
}

#[tokio::test]
async fn test_empty_message_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .transform(&TransformRequest {
            message: "   ".to_string(),
            validation: false,
            debug: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SandboxError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri()).with_timeout(Duration::from_millis(200));
    let err = ReframeClient::new(config)
        .unwrap()
        .generate(&GenerateRequest::new(MessageFamily::Mt, "MT103", "standard"))
        .await
        .unwrap_err();

    assert!(matches!(err, SandboxError::Timeout { .. }), "got {err}");
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ReframeClient::new(ApiConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();
    let err = client
        .validate(&ValidateRequest::mt("{1:F01BANK}", false, false))
        .await
        .unwrap_err();

    assert!(matches!(err, SandboxError::Connection { .. }), "got {err}");
}
