//! Integration tests for SynthesisClient using wiremock
//!
//! These tests validate the request executor against mock synthesis servers.

mod common;

use common::{client, closed_address, item, MsgpackText};
use tempfile::TempDir;
use tts_batch::models::{Address, WorkItem, DEFAULT_MARKER};
use tts_batch::synthesis::Executor;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn address_of(server: &MockServer) -> Address {
    Address::new(server.address().to_string())
}

/// Test successful synthesis writes the response body to <id>.wav
#[tokio::test]
async fn test_synthesis_success_writes_audio() {
    let mock_server = MockServer::start().await;
    let audio = b"RIFF....WAVEfmt fake audio".to_vec();

    Mock::given(method("POST"))
        .and(path("/v1/tts"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/msgpack"))
        .and(MsgpackText(String::from("hello world")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let item = item("hello world");
    let server = address_of(&mock_server);
    let outcome = client(&dir).execute(&item, &server).await;

    assert!(outcome.success, "Synthesis should succeed: {}", outcome.detail);
    assert_eq!(outcome.server, server);
    assert_eq!(outcome.item_id, item.id());

    let expected = dir.path().join(format!("{}.wav", item.id()));
    assert_eq!(outcome.detail, expected.display().to_string());
    assert_eq!(std::fs::read(expected).unwrap(), audio);
}

/// Test non-200 status becomes "HTTP <code>"
#[tokio::test]
async fn test_server_error_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1) // No retry inside the executor
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let outcome = client(&dir)
        .execute(&item("hello"), &address_of(&mock_server))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.detail, "HTTP 500");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Test other success-family statuses are still failures
#[tokio::test]
async fn test_non_200_success_status_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let outcome = client(&dir)
        .execute(&item("hello"), &address_of(&mock_server))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.detail, "HTTP 202");
}

/// Test connection refused is captured as a failed outcome
#[tokio::test]
async fn test_connection_refused() {
    let dir = TempDir::new().unwrap();
    let server = closed_address();
    let outcome = client(&dir).execute(&item("hello"), &server).await;

    assert!(!outcome.success);
    assert_eq!(outcome.server, server);
    assert!(
        outcome.detail.starts_with("error sending request for url (http://127.0.0.1:"),
        "unexpected detail: {}",
        outcome.detail
    );
    assert!(outcome.detail.contains("/v1/tts"));
    assert!(
        outcome.detail.contains("Connection refused"),
        "missing transport cause: {}",
        outcome.detail
    );
}

/// Test records without a speaker line never reach the server
#[tokio::test]
async fn test_no_usable_text_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let item = WorkItem::from_raw("Assistant: only an answer here", DEFAULT_MARKER);
    let outcome = client(&dir)
        .execute(&item, &address_of(&mock_server))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.detail, "No usable text found");
}

/// Test identical raw input collides on the same output file
#[tokio::test]
async fn test_identical_input_same_output_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = client(&dir);
    let server = address_of(&mock_server);

    let first = client.execute(&item("same text"), &server).await;
    let second = client.execute(&item("same text"), &server).await;

    assert!(first.success && second.success);
    assert_eq!(first.item_id, second.item_id);
    assert_eq!(first.detail, second.detail);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

/// Test a full URL with scheme is accepted as a server address
#[tokio::test]
async fn test_address_with_scheme() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let outcome = client(&dir)
        .execute(&item("hi"), &Address::new(mock_server.uri()))
        .await;

    assert!(outcome.success, "{}", outcome.detail);
}
