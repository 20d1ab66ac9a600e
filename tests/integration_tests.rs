//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: search → paging → export → CSV file

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xrpl_history::cli::export_history;
use xrpl_history::export::{write_records_to_csv, CsvWriterConfig, CSV_COLUMNS};
use xrpl_history::http::{HttpClient, HttpClientConfig};
use xrpl_history::ledger::LedgerClient;
use xrpl_history::pagination::{Navigation, Session};
use xrpl_history::render::{render_session, INVALID_ADDRESS_MESSAGE};
use xrpl_history::{PageSize, EXAMPLE_ACCOUNT};

// ============================================================================
// Mock Ledger
// ============================================================================

fn transactions(page: usize, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| {
            json!({
                "meta": {"TransactionResult": "tesSUCCESS"},
                "tx": {
                    "Account": EXAMPLE_ACCOUNT,
                    "Amount": format!("{}", 1_000_000 + n),
                    "Destination": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
                    "Fee": "12",
                    "Sequence": page * 100 + n,
                    "TransactionType": "Payment",
                    "date": 700_000_000 + n,
                    "hash": format!("P{page}T{n}"),
                    "inLedger": 80_000_000 - page,
                    "ledger_index": 80_000_000 - page
                },
                "validated": true
            })
        })
        .collect()
}

fn success(page: usize, count: usize, marker: Option<Value>) -> Value {
    let mut result = json!({
        "account": EXAMPLE_ACCOUNT,
        "ledger_index_max": 80_000_000,
        "ledger_index_min": 32_570,
        "limit": 10,
        "status": "success",
        "transactions": transactions(page, count),
        "validated": true
    });
    if let Some(marker) = marker {
        result["marker"] = marker;
    }
    json!({ "result": result })
}

/// Three pages of 10, 10 and 4 transactions chained by markers
async fn mount_history(server: &MockServer) {
    let second = json!({"ledger": 79_999_999, "seq": 3});
    let third = json!({"ledger": 79_999_998, "seq": 11});

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"params": [{"marker": second}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(1, 10, Some(third.clone()))))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({"params": [{"marker": third}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(2, 4, None)))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "method": "account_tx",
            "params": [{"account": EXAMPLE_ACCOUNT, "limit": 10}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(0, 10, Some(second))))
        .mount(server)
        .await;
}

fn session_for(server: &MockServer) -> Session<LedgerClient> {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .no_rate_limit()
        .build();
    let http = HttpClient::with_config(config).unwrap();
    let client = LedgerClient::new(http, format!("{}/", server.uri()));
    Session::new(client, PageSize::Ten)
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

// ============================================================================
// End-to-End Tests
// ============================================================================

#[tokio::test]
async fn test_browse_full_history_and_download() {
    let server = MockServer::start().await;
    mount_history(&server).await;
    let mut session = session_for(&server);

    session.set_address(EXAMPLE_ACCOUNT);
    let first = session.search().await.unwrap();
    assert_eq!(first.len(), 10);
    assert!(session.controls().next);
    assert!(!session.controls().previous);

    assert_eq!(session.next().await.unwrap(), Navigation::Fetched);
    assert_eq!(session.next().await.unwrap(), Navigation::Fetched);
    assert_eq!(session.current_page().unwrap().len(), 4);
    assert!(!session.controls().next);
    assert_eq!(request_count(&server).await, 3);

    // Going back and forth is served from the cache
    session.previous().unwrap();
    session.previous().unwrap();
    assert_eq!(session.next().await.unwrap(), Navigation::CacheHit);
    assert_eq!(request_count(&server).await, 3);

    let records = session.flatten_for_export();
    assert_eq!(records.len(), 24);
    assert_eq!(records[0].hash.as_deref(), Some("P0T0"));
    assert_eq!(records[23].hash.as_deref(), Some("P2T3"));

    assert!(!session.controls().download);
    assert_eq!(session.prepare_export().unwrap(), 24);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("txns.csv");
    let rows = write_records_to_csv(&file, session.download_ready().unwrap().records(), None)
        .unwrap();
    assert_eq!(rows, 24);

    let content = std::fs::read_to_string(&file).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), CSV_COLUMNS.join(","));
    assert_eq!(lines.count(), 24);
}

#[tokio::test]
async fn test_export_command_flow() {
    let server = MockServer::start().await;
    mount_history(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("history.csv");
    let summary = export_history(
        session_for(&server),
        EXAMPLE_ACCOUNT,
        None,
        &file,
        &CsvWriterConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.rows, 24);
    assert!(!summary.truncated);
    assert!(file.exists());
}

#[tokio::test]
async fn test_malformed_address() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "error": "actMalformed",
                "error_code": 35,
                "error_message": "Account malformed.",
                "request": {"account": "abc", "command": "account_tx"},
                "status": "error"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.set_address("abc");
    let page = session.search().await.unwrap();
    assert!(page.is_error());

    let controls = session.controls();
    assert!(!controls.next);
    assert!(!controls.previous);
    assert!(controls.search);
    assert!(render_session(&session).contains(INVALID_ADDRESS_MESSAGE));
}

#[tokio::test]
async fn test_server_error_is_shown_and_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_history(&server).await;

    let mut session = session_for(&server);
    session.set_address(EXAMPLE_ACCOUNT);

    assert!(session.search().await.is_err());
    assert!(session.cache().is_empty());
    assert!(render_session(&session).contains("Error: HTTP 503: overloaded"));

    let page = session.search().await.unwrap();
    assert_eq!(page.len(), 10);
    assert!(session.failure().is_none());
}
