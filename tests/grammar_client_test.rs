//! LanguageTool HTTP binding against a mock provider

use serde_json::json;
use std::time::Duration;
use textlens_core::config::GrammarConfig;
use textlens_core::{GrammarChecker, GrammarClient, LanguageToolChecker, TextLensError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, timeout: Duration) -> GrammarConfig {
    GrammarConfig {
        endpoint: format!("{}/v2/check", server.uri()),
        language: "en-US".to_string(),
        timeout,
    }
}

#[tokio::test]
async fn test_matches_are_mapped() {
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200).set_body_json(json!({
        "software": { "name": "LanguageTool", "version": "6.4" },
        "language": { "name": "English (US)", "code": "en-US" },
        "matches": [{
            "message": "Possible spelling mistake found.",
            "shortMessage": "Spelling mistake",
            "replacements": [{ "value": "This" }],
            "offset": 0,
            "length": 4,
            "context": { "text": "Thsi is bad", "offset": 0, "length": 4 },
            "sentence": "Thsi is bad",
            "rule": {
                "id": "MORFOLOGIK_RULE_EN_US",
                "description": "Possible spelling mistake",
                "issueType": "misspelling",
                "category": { "id": "TYPOS", "name": "Possible Typo" }
            }
        }]
    }));

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(body_string_contains("language=en-US"))
        .and(body_string_contains("text=Thsi+is+bad"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;

    let checker = LanguageToolChecker::new(&config_for(&server, Duration::from_secs(2))).unwrap();
    let issues = checker.check("Thsi is bad").await.unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].offset, 0);
    assert_eq!(issues[0].length, 4);
    assert_eq!(issues[0].rule.id, "MORFOLOGIK_RULE_EN_US");
    assert_eq!(issues[0].rule.category, "TYPOS");
    assert_eq!(issues[0].replacements[0].value, "This");
}

#[tokio::test]
async fn test_server_error_is_reported_by_checker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let checker = LanguageToolChecker::new(&config_for(&server, Duration::from_secs(2))).unwrap();
    let result = checker.check("anything").await;

    assert!(matches!(result, Err(TextLensError::GrammarProvider(ref msg)) if msg.contains("503")));
}

#[tokio::test]
async fn test_client_absorbs_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GrammarClient::from_config(&config_for(&server, Duration::from_secs(2))).unwrap();
    assert!(client.check("anything").await.is_empty());
}

#[tokio::test]
async fn test_client_absorbs_slow_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "matches": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client =
        GrammarClient::from_config(&config_for(&server, Duration::from_millis(100))).unwrap();

    let started = std::time::Instant::now();
    assert!(client.check("anything").await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_client_absorbs_garbage_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = GrammarClient::from_config(&config_for(&server, Duration::from_secs(2))).unwrap();
    assert!(client.check("anything").await.is_empty());
}

#[tokio::test]
async fn test_client_absorbs_unreachable_provider() {
    let config = GrammarConfig {
        endpoint: "http://127.0.0.1:9/v2/check".to_string(),
        language: "en-US".to_string(),
        timeout: Duration::from_millis(500),
    };

    let client = GrammarClient::from_config(&config).unwrap();
    assert!(client.check("anything").await.is_empty());
}
