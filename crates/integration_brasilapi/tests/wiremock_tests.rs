//! Integration tests for the BrasilAPI client using wiremock
//!
//! Verify taxonomy classification, retry behavior, and coordinate parsing
//! against a mock HTTP server.

use application::ports::{GeocodeError, GeocodePort};
use integration_brasilapi::{BrasilApiClient, BrasilApiConfig, RetryPolicy};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Sample CEP v2 response with coordinates
fn sample_cep_response() -> serde_json::Value {
    serde_json::json!({
        "cep": "01310930",
        "state": "SP",
        "city": "São Paulo",
        "neighborhood": "Bela Vista",
        "street": "Avenida Paulista",
        "service": "open-cep",
        "location": {
            "type": "Point",
            "coordinates": {
                "latitude": -23.5613,
                "longitude": -46.6565
            }
        }
    })
}

/// Create a test client against the mock server, with fast retries
fn create_test_client(mock_server: &MockServer) -> BrasilApiClient {
    let config = BrasilApiConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
        retry: RetryPolicy {
            initial_delay_ms: 1,
            max_delay_ms: 5,
            ..RetryPolicy::default()
        }
        .without_jitter(),
    };
    #[allow(clippy::expect_used)]
    BrasilApiClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn lookup_success_extracts_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_cep_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let record = client.lookup("01310930", false).await.expect("record");

    assert_eq!(record.cep, "01310930");
    assert_eq!(record.latitude, Some(-23.5613));
    assert_eq!(record.longitude, Some(-46.6565));
    assert_eq!(record.city.as_deref(), Some("São Paulo"));
    assert_eq!(record.state.as_deref(), Some("SP"));
    assert_eq!(record.street.as_deref(), Some("Avenida Paulista"));
    assert_eq!(record.neighborhood.as_deref(), Some("Bela Vista"));
    assert_eq!(record.service.as_deref(), Some("open-cep"));
}

#[tokio::test]
async fn lookup_normalizes_before_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_cep_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let record = client.lookup("01310-930", false).await.expect("record");
    assert_eq!(record.cep, "01310930");
}

#[tokio::test]
async fn short_code_is_not_found_without_any_request() {
    let mock_server = MockServer::start().await;
    // No mock mounted: any request would return 404 from wiremock itself,
    // but the expectation below guarantees none is issued.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("abc123", false).await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::NotFound {
            cep: "abc123".to_string()
        }
    );
}

#[tokio::test]
async fn http_404_is_not_found_never_transport() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/99999999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // 404 is terminal, no retries
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("99999999", false).await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::NotFound {
            cep: "99999999".to_string()
        }
    );
}

#[tokio::test]
async fn missing_coordinates_flagged_only_when_required() {
    let mock_server = MockServer::start().await;
    let body = serde_json::json!({
        "cep": "01310930",
        "city": "São Paulo",
        "state": "SP",
        "location": {
            "type": "Point",
            "coordinates": {"latitude": "", "longitude": ""}
        }
    });
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    // Plain lookup succeeds with absent coordinates
    let record = client.lookup("01310930", false).await.expect("record");
    assert!(!record.has_coordinates());

    // Requiring coordinates turns the same record into MissingCoordinates
    let err = client.lookup("01310930", true).await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::MissingCoordinates {
            cep: "01310930".to_string()
        }
    );
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let mock_server = MockServer::start().await;

    // Two failures, then success: must succeed within the 3-attempt budget
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_cep_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let record = client.lookup("01310930", false).await.expect("record");
    assert_eq!(record.cep, "01310930");
}

#[tokio::test]
async fn persistent_server_error_surfaces_single_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3) // exactly 3 attempts total
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("01310930", false).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Transport(_)));
}

#[tokio::test]
async fn client_error_status_is_transport_without_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("01310930", false).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Transport(_)));
}

#[tokio::test]
async fn malformed_json_is_transport() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("01310930", false).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Transport(_)));
}

#[tokio::test]
async fn rate_limit_is_retried_then_succeeds() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_cep_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let record = client.lookup("01310930", false).await.expect("record");
    assert!(record.has_coordinates());
}

#[tokio::test]
async fn coordinates_as_text_are_parsed() {
    let mock_server = MockServer::start().await;
    let body = serde_json::json!({
        "cep": "01310930",
        "location": {
            "coordinates": {"latitude": "-23.5613", "longitude": "-46.6565"}
        }
    });
    Mock::given(method("GET"))
        .and(path("/01310930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let record = client.lookup("01310930", true).await.expect("record");
    assert_eq!(record.latitude, Some(-23.5613));
    assert_eq!(record.longitude, Some(-46.6565));
}
