//! Tests for the ledger module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::PageSize;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "rLNaPoKeeBjZe2qs6x52yVPZpZ8td4dc6w";

fn marker(ledger: u64, seq: u64) -> Marker {
    serde_json::from_value(json!({"ledger": ledger, "seq": seq})).unwrap()
}

fn sample_result() -> serde_json::Value {
    json!({
        "account": ACCOUNT,
        "ledger_index_max": 80_000_000,
        "ledger_index_min": 32_570,
        "limit": 10,
        "marker": {"ledger": 79_999_000, "seq": 12},
        "status": "success",
        "validated": true,
        "transactions": [{
            "meta": {"TransactionResult": "tesSUCCESS"},
            "validated": true,
            "tx": {
                "Account": ACCOUNT,
                "Amount": "1000000",
                "Destination": "rDestination1111111111111111111",
                "DestinationTag": 42,
                "Fee": "12",
                "Flags": 2_147_483_648_u64,
                "LastLedgerSequence": 79_999_010,
                "Sequence": 7,
                "SigningPubKey": "03ABCDEF",
                "TransactionType": "Payment",
                "TxnSignature": "3045022100",
                "date": 750_000_000,
                "hash": "C0FFEE",
                "inLedger": 79_999_001,
                "ledger_index": 79_999_001
            }
        }]
    })
}

fn test_client(server: &MockServer) -> LedgerClient {
    let http = HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap();
    LedgerClient::new(http, server.uri())
}

// ============================================================================
// Request Tests
// ============================================================================

#[test]
fn test_first_page_request_omits_marker() {
    let query = Query::new(ACCOUNT, PageSize::Ten);
    let body = account_tx_request(&query, None);

    assert_eq!(
        body,
        json!({
            "method": "account_tx",
            "params": [{
                "api_version": 1,
                "account": ACCOUNT,
                "binary": false,
                "forward": false,
                "ledger_index_max": -1,
                "ledger_index_min": -1,
                "limit": 10
            }]
        })
    );
}

#[test]
fn test_next_page_request_passes_marker_verbatim() {
    let query = Query::new(ACCOUNT, PageSize::TwoHundred);
    let body = account_tx_request(&query, Some(&marker(123, 4)));

    assert_eq!(body["params"][0]["marker"], json!({"ledger": 123, "seq": 4}));
    assert_eq!(body["params"][0]["limit"], 200);
}

#[test]
fn test_marker_with_unexpected_shape_is_kept_opaque() {
    let odd: Marker = serde_json::from_value(json!("opaque-token")).unwrap();
    let body = account_tx_request(&Query::new(ACCOUNT, PageSize::Ten), Some(&odd));

    assert_eq!(body["params"][0]["marker"], json!("opaque-token"));
    assert_eq!(odd.ledger(), None);
    assert_eq!(odd.to_string(), "\"opaque-token\"");
}

#[test]
fn test_marker_display() {
    assert_eq!(marker(79_999_000, 12).to_string(), "79999000/12");
}

// ============================================================================
// Response Parsing Tests
// ============================================================================

#[test]
fn test_parse_success_page() {
    let page: Page = serde_json::from_value(sample_result()).unwrap();

    assert!(page.is_success());
    assert!(!page.is_error());
    assert!(page.has_more());
    assert_eq!(page.len(), 1);
    assert_eq!(page.limit, Some(10));
    assert_eq!(page.marker, Some(marker(79_999_000, 12)));

    let tx = &page.transactions[0].tx;
    assert_eq!(tx.account.as_deref(), Some(ACCOUNT));
    assert_eq!(tx.destination_tag, Some(42));
    assert_eq!(tx.transaction_type.as_deref(), Some("Payment"));
    assert_eq!(tx.in_ledger, Some(79_999_001));
    assert_eq!(tx.other.get("Flags"), Some(&json!(2_147_483_648_u64)));
}

#[test]
fn test_parse_last_page_without_marker() {
    let mut result = sample_result();
    result.as_object_mut().unwrap().remove("marker");
    let page: Page = serde_json::from_value(result).unwrap();
    assert!(!page.has_more());

    let page: Page = serde_json::from_value(json!({
        "status": "success",
        "transactions": [],
        "marker": null
    }))
    .unwrap();
    assert!(!page.has_more());
    assert!(page.is_empty());
}

#[test]
fn test_parse_error_page() {
    let page: Page = serde_json::from_value(json!({
        "status": "error",
        "error": "actMalformed",
        "error_code": 35,
        "error_message": "Account malformed.",
        "request": {"account": "not-an-address", "command": "account_tx"}
    }))
    .unwrap();

    assert_eq!(page.status, PageStatus::Error);
    assert!(page.is_error());
    assert_eq!(page.error_code, Some(ERROR_CODE_ACCOUNT_MALFORMED));
    assert!(page.transactions.is_empty());
}

#[test]
fn test_parse_unknown_status() {
    let page: Page = serde_json::from_value(json!({"status": "queued"})).unwrap();
    assert_eq!(page.status, PageStatus::Unknown("queued".to_string()));
    assert!(!page.is_success());
    assert!(!page.is_error());
}

#[test]
fn test_tx_json_alias() {
    let entry: Transaction = serde_json::from_value(json!({
        "tx_json": {"Account": ACCOUNT, "TransactionType": "OfferCreate"},
        "validated": true
    }))
    .unwrap();
    assert_eq!(entry.tx.transaction_type.as_deref(), Some("OfferCreate"));
}

#[test]
fn test_amount_text() {
    let drops = TxRecord {
        amount: Some(json!("25000000")),
        ..TxRecord::default()
    };
    assert_eq!(drops.amount_text(), "25000000");

    let issued = TxRecord {
        amount: Some(json!({"currency": "USD", "issuer": "rIssuer", "value": "1.5"})),
        ..TxRecord::default()
    };
    assert_eq!(issued.amount_text(), "1.5 USD/rIssuer");

    assert_eq!(TxRecord::default().amount_text(), "");
}

#[test]
fn test_close_time_uses_ledger_epoch() {
    let tx = TxRecord {
        date: Some(0),
        ..TxRecord::default()
    };
    assert_eq!(
        tx.close_time().unwrap().to_rfc3339(),
        "2000-01-01T00:00:00+00:00"
    );
    assert!(TxRecord::default().close_time().is_none());
}

// ============================================================================
// LedgerClient Tests
// ============================================================================

#[tokio::test]
async fn test_ledger_client_fetches_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(account_tx_request(
            &Query::new(ACCOUNT, PageSize::Ten),
            None,
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": sample_result()})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let page = client
        .fetch_page(&Query::new(ACCOUNT, PageSize::Ten), None)
        .await
        .unwrap();

    assert!(page.is_success());
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_ledger_client_sends_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "account_tx",
            "params": [{"marker": {"ledger": 5, "seq": 6}, "limit": 50}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "success", "transactions": []}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let page = client
        .fetch_page(&Query::new(ACCOUNT, PageSize::Fifty), Some(&marker(5, 6)))
        .await
        .unwrap();

    assert!(!page.has_more());
}

#[tokio::test]
async fn test_ledger_client_logical_error_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "error", "error": "actMalformed", "error_code": 35}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let page = client
        .fetch_page(&Query::new("not-an-address", PageSize::Ten), None)
        .await
        .unwrap();

    assert!(page.is_error());
    assert_eq!(page.error_code, Some(35));
}

#[tokio::test]
async fn test_ledger_client_missing_result_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_page(&Query::new(ACCOUNT, PageSize::Ten), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_ledger_client_server_error_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_page(&Query::new(ACCOUNT, PageSize::Ten), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
}
