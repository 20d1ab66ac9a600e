//! Wire types for the `account_tx` method
//!
//! A [`Page`] is the `result` object of one `account_tx` response. Field
//! names follow the ledger's JSON exactly so that pages round-trip without
//! loss.

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds between the Unix epoch and the ledger epoch (2000-01-01T00:00:00Z)
pub const LEDGER_EPOCH_OFFSET: i64 = 946_684_800;

/// Error code the ledger returns for a malformed account address
pub const ERROR_CODE_ACCOUNT_MALFORMED: i64 = 35;

// ============================================================================
// Marker
// ============================================================================

/// Opaque pagination marker returned by the ledger
///
/// The value is passed back verbatim on the next request and never built
/// locally. Its usual shape is `{"ledger": n, "seq": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(JsonValue);

impl Marker {
    /// The raw marker value
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Ledger index component, if present (for logging only)
    pub fn ledger(&self) -> Option<u64> {
        self.0.get("ledger").and_then(JsonValue::as_u64)
    }

    /// Sequence component, if present (for logging only)
    pub fn seq(&self) -> Option<u64> {
        self.0.get("seq").and_then(JsonValue::as_u64)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ledger(), self.seq()) {
            (Some(ledger), Some(seq)) => write!(f, "{ledger}/{seq}"),
            _ => write!(f, "{}", self.0),
        }
    }
}

// ============================================================================
// Page Status
// ============================================================================

/// Status reported inside an `account_tx` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageStatus {
    /// The ledger answered the query
    Success,
    /// The ledger rejected the query; see `error` / `error_code`
    Error,
    /// Any other status string
    Unknown(String),
}

impl Default for PageStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for PageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Unknown(value),
        }
    }
}

impl From<PageStatus> for String {
    fn from(status: PageStatus) -> Self {
        match status {
            PageStatus::Success => "success".to_string(),
            PageStatus::Error => "error".to_string(),
            PageStatus::Unknown(value) => value,
        }
    }
}

// ============================================================================
// Transactions
// ============================================================================

/// The `tx` object of a transaction entry
///
/// Only the fields exported to CSV are typed; everything else the ledger
/// sends is kept in `other`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TxRecord {
    #[serde(rename = "Account", default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Drops as a decimal string, or an issued-currency object
    #[serde(rename = "Amount", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<JsonValue>,

    #[serde(rename = "Destination", default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(rename = "DestinationTag", default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,

    #[serde(rename = "Fee", default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,

    #[serde(
        rename = "LastLedgerSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_ledger_sequence: Option<u32>,

    #[serde(rename = "Sequence", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(rename = "SigningPubKey", default, skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<String>,

    #[serde(rename = "TransactionType", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,

    #[serde(rename = "TxnSignature", default, skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<String>,

    /// Close time in seconds since the ledger epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(rename = "inLedger", default, skip_serializing_if = "Option::is_none")]
    pub in_ledger: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<u32>,

    #[serde(flatten)]
    pub other: JsonObject,
}

impl TxRecord {
    /// Amount as display text
    ///
    /// Drops are shown as-is; issued currencies as `value CURRENCY/issuer`.
    pub fn amount_text(&self) -> String {
        match &self.amount {
            None => String::new(),
            Some(JsonValue::String(drops)) => drops.clone(),
            Some(JsonValue::Object(obj)) => {
                let field = |name: &str| obj.get(name).and_then(JsonValue::as_str).unwrap_or("");
                match obj.get("issuer").and_then(JsonValue::as_str) {
                    Some(issuer) => format!("{} {}/{issuer}", field("value"), field("currency")),
                    None => format!("{} {}", field("value"), field("currency")),
                }
            }
            Some(other) => other.to_string(),
        }
    }

    /// Close time converted from the ledger epoch
    pub fn close_time(&self) -> Option<DateTime<Utc>> {
        self.date
            .and_then(|secs| DateTime::from_timestamp(secs + LEDGER_EPOCH_OFFSET, 0))
    }
}

/// One entry of the `transactions` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "tx_json")]
    pub tx: TxRecord,

    #[serde(default)]
    pub meta: JsonValue,

    #[serde(default)]
    pub validated: bool,
}

// ============================================================================
// Page
// ============================================================================

/// One page of account history, i.e. the `result` of one `account_tx` call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub status: PageStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Short error token, e.g. `actMalformed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Absent when there are no further pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index_min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index_max: Option<i64>,

    #[serde(default)]
    pub validated: bool,
}

impl Page {
    /// Whether the ledger answered the query
    pub fn is_success(&self) -> bool {
        self.status == PageStatus::Success
    }

    /// Whether the ledger rejected the query
    ///
    /// An `error` field counts even when the status string is missing.
    pub fn is_error(&self) -> bool {
        self.status == PageStatus::Error || self.error.is_some() || self.error_code.is_some()
    }

    /// Whether a further page can be requested from this one
    pub fn has_more(&self) -> bool {
        self.marker.is_some()
    }

    /// Number of transactions on this page
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether this page has no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
