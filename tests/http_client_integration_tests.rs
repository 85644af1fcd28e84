//! Integration Tests for the Classifying HTTP Client
//!
//! UNIT UNDER TEST: HttpClient with HttpTransport
//!
//! BUSINESS RESPONSIBILITY:
//!   - Execute requests with the configured timeout and user agent
//!   - Return successful exchanges untouched
//!   - Return every failure as a classified error carrying the request URL
//!
//! TEST COVERAGE:
//!   - 2xx pass-through
//!   - 404, 422 and 5xx classification from real responses
//!   - Client timeout mapped to TimeOut
//!   - Refused connections left unclassified
//!   - Body read failures after the status arrived left unclassified
//!   - Invalid URLs reported as NetworkRequestFailed

mod common;

use common::{backend_error_body, create_test_client};
use multisig_errors::{AppError, ErrorDomain, ErrorKind, StatusCode, UnexpectedErrorCode};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn expect_structured(result: Result<multisig_errors::HttpExchange, AppError>) -> multisig_errors::StructuredError {
    match result {
        Err(AppError::Structured(err)) => err,
        other => panic!("expected a structured error, got {other:?}"),
    }
}

/// Serve one response whose head promises more body than is ever sent,
/// then hold the connection open for `hold` before dropping it.
async fn serve_truncated_body(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\n{\"partial\":")
            .await
            .expect("write response head");
        tokio::time::sleep(hold).await;
    });
    format!("http://{addr}/v1/about")
}

// ============================================================================
// HTTP Client Tests
// ============================================================================

#[tokio::test]
async fn test_success_response_passes_through() {
    // Test successful request execution
    // Verifies that 2xx exchanges come back untouched with their body

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/about"))
        .and(header("user-agent", "multisig-errors-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\":\"backend\"}"))
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();
    let url = format!("{}/v1/about", mock_server.uri());

    let result = client.get(&url).await;

    let exchange = result.expect("2xx should pass through");
    assert_eq!(exchange.status, StatusCode::OK);
    assert_eq!(exchange.body.as_deref(), Some(&b"{\"name\":\"backend\"}"[..]));
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_not_found_is_classified_with_request_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/safes/0x1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();
    let url = format!("{}/v1/safes/0x1", mock_server.uri());

    let error = expect_structured(client.get(&url).await);

    assert_eq!(error.kind(), ErrorKind::EntityNotFound);
    assert_eq!(error.request_url(), Some(url.as_str()));
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_unprocessable_entity_with_known_code() {
    // Test backend envelope decoding through the real transport
    // Verifies code 50 becomes SafeInfoNotFound without logging

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/safes/0x2"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(backend_error_body(50, "Safe not found")),
        )
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();
    let url = format!("{}/v1/safes/0x2", mock_server.uri());

    let error = expect_structured(client.get(&url).await);

    assert_eq!(error.kind(), ErrorKind::SafeInfoNotFound);
    assert_eq!(error.domain(), ErrorDomain::Network);
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_unprocessable_entity_with_empty_body_logs_missing_data() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();

    let error = expect_structured(client.get(&mock_server.uri()).await);

    assert_eq!(
        error.kind(),
        ErrorKind::UnexpectedError(UnexpectedErrorCode::MissingResponseData)
    );
    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "Missing data in unprocessableEntity error");
}

#[tokio::test]
async fn test_server_error_is_not_logged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();

    let error = expect_structured(client.get(&mock_server.uri()).await);

    assert_eq!(error.code(), 503);
    assert!(!error.loggable());
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_client_timeout_maps_to_time_out() {
    // Test slow backend handling
    // Verifies the reqwest timeout becomes TimeOut quoting the configured seconds

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let (client, logger) = create_test_client();

    let error = expect_structured(client.get(&mock_server.uri()).await);

    assert_eq!(error.kind(), ErrorKind::TimeOut);
    assert_eq!(error.reason(), "Request timed out after 1s.");
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_left_unclassified() {
    // Test network failure handling
    // Verifies failures outside the connectivity table pass through

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let (client, _logger) = create_test_client();

    let result = client.get(&format!("http://127.0.0.1:{port}/v1/about")).await;

    assert!(
        matches!(result, Err(AppError::Framework(_))),
        "expected unclassified failure, got {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_url_is_network_request_failed() {
    let (client, logger) = create_test_client();

    let error = expect_structured(client.get("not a url").await);

    assert_eq!(error.kind(), ErrorKind::NetworkRequestFailed);
    assert_eq!(error.domain(), ErrorDomain::TransportWrapper);
    assert_eq!(error.request_url(), Some("not a url"));
    assert_eq!(logger.len(), 1);
}

#[tokio::test]
async fn test_body_stalled_past_timeout_is_not_a_time_out() {
    // Test body read failure handling
    // Verifies a status already arrived, so the failure is not a connectivity error

    let url = serve_truncated_body(Duration::from_secs(3)).await;
    let (client, logger) = create_test_client();

    let result = client.get(&url).await;

    assert!(
        matches!(result, Err(AppError::Framework(_))),
        "expected unclassified failure, got {result:?}"
    );
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_connection_closed_mid_body_is_left_unclassified() {
    let url = serve_truncated_body(Duration::ZERO).await;
    let (client, _logger) = create_test_client();

    let result = client.get(&url).await;

    assert!(
        matches!(result, Err(AppError::Framework(_))),
        "expected unclassified failure, got {result:?}"
    );
}
