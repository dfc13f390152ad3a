//! Integration tests for the luxury probe using wiremock HTTP mocks.

use std::sync::Arc;

use bellhop_core::{AppConfig, Environment};
use bellhop_sabre::{AuthManager, LuxuryProbe, SabreClient};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Cert,
        base_url: base_url.to_owned(),
        client_id: "test-id".to_owned(),
        client_secret: "test-secret".to_owned(),
        epr_user: None,
        pcc: None,
        aaa_domain: None,
        password: None,
        log_level: "info".to_owned(),
        user_agent: "bellhop/0.1 (test)".to_owned(),
        search_timeout_secs: 5,
        auth_timeout_secs: 5,
        probe_delay_ms: 1,
        verify_failure_threshold: 3,
    }
}

fn test_probe(server: &MockServer) -> LuxuryProbe {
    let config = test_config(&server.uri());
    let client = Arc::new(
        SabreClient::with_base_url(&server.uri()).expect("client construction should not fail"),
    );
    let auth = Arc::new(AuthManager::new(Arc::clone(&client), config.clone()));
    LuxuryProbe::new(client, auth, &config)
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tkn-123",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

fn avail_with_rates(rates: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "GetHotelAvailRS": {"HotelAvailInfos": {"HotelAvailInfo": [{
            "HotelInfo": {"HotelCode": "100066", "HotelName": "The Setai"},
            "HotelRateInfo": {"RateInfos": {"ConvertedRateInfo": rates}}
        }]}}
    })
}

#[tokio::test]
async fn probe_confirms_when_a_candidate_code_comes_back() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v3.0.0/get/hotelavail"))
        .and(body_string_contains("\"HotelCode\":\"100066\""))
        .and(body_string_contains("\"ExactMatchOnly\":false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(avail_with_rates(
            serde_json::json!([
                {"RatePlanCode": "RAC", "AmountAfterTax": 700.0, "CurrencyCode": "USD"},
                {
                    "RatePlanCode": "VIR",
                    "RatePlanName": "Virtuoso Rate",
                    "RoomDescription": "Daily breakfast for two and a $100 spa credit",
                    "AmountAfterTax": 850.0,
                    "CurrencyCode": "USD"
                }
            ]),
        )))
        .mount(&server)
        .await;

    let probe = test_probe(&server);
    let result = probe.probe("100066", None).await;

    assert!(result.is_confirmed);
    assert_eq!(result.rate_code_found.as_deref(), Some("VIR"));
    assert_eq!(result.rate_amount, Some(850.0));
    assert_eq!(result.currency.as_deref(), Some("USD"));
    assert!(result.benefits_detected.contains(&"breakfast".to_owned()));
    assert!(result.benefits_detected.contains(&"spa".to_owned()));
    assert!(result.benefits_detected.contains(&"credit".to_owned()));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn probe_rejects_when_only_foreign_codes_come_back() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v3.0.0/get/hotelavail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(avail_with_rates(
            serde_json::json!([
                {"RatePlanCode": "RAC", "AmountAfterTax": 400.0, "CurrencyCode": "USD"}
            ]),
        )))
        .mount(&server)
        .await;

    let probe = test_probe(&server);
    let result = probe.probe("100066", None).await;

    assert!(!result.is_confirmed);
    assert!(result.rate_code_found.is_none());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn probe_converts_upstream_failure_into_result_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v3.0.0/get/hotelavail"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let probe = test_probe(&server);
    let result = probe.probe("100066", None).await;

    assert!(!result.is_confirmed);
    let error = result.error.expect("error should be captured");
    assert!(error.contains("500"), "unexpected error: {error}");
}

#[tokio::test]
async fn probe_batch_continues_past_a_bad_hotel() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v3.0.0/get/hotelavail"))
        .and(body_string_contains("\"HotelCode\":\"100066\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(avail_with_rates(
            serde_json::json!([{"RatePlanCode": "VIR", "AmountAfterTax": 850.0}]),
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3.0.0/get/hotelavail"))
        .and(body_string_contains("\"HotelCode\":\"4075\""))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let probe = test_probe(&server);
    let targets = vec![
        ("4075".to_owned(), None),
        ("100066".to_owned(), Some("LW".to_owned())),
    ];
    let results = probe.probe_batch(&targets).await;

    assert_eq!(results.len(), 2);
    assert!(results["4075"].error.is_some());
    assert!(results["100066"].is_confirmed);
}
