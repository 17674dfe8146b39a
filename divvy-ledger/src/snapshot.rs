//! Snapshot document codec
//!
//! A [`Snapshot`] is the unit of persistence, export, and import. On the
//! wire it travels wrapped in a [`SnapshotDocument`] carrying a format
//! version tag and an export timestamp:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportDate": "2024-01-15T19:30:00Z",
//!   "data": { "users": [...], "transactions": [...], "currency": "USD" }
//! }
//! ```
//!
//! Import is destructive and total: callers replace the entire store state
//! with the decoded snapshot, never merge.

use crate::types::{Currency, Member, MemberId, Transaction};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot document format version
pub const FORMAT_VERSION: &str = "1.0";

/// Authoritative ledger state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current member set
    pub users: Vec<Member>,

    /// Full transaction history, in insertion order
    pub transactions: Vec<Transaction>,

    /// Active currency for the whole ledger
    pub currency: Currency,
}

impl Snapshot {
    /// Empty snapshot with the given currency
    pub fn empty(currency: Currency) -> Self {
        Self {
            users: Vec::new(),
            transactions: Vec::new(),
            currency,
        }
    }
}

impl Default for Snapshot {
    /// The stable starter state: two members, USD, no transactions
    fn default() -> Self {
        Self {
            users: vec![
                Member::new(MemberId::new("u1"), "Alice"),
                Member::new(MemberId::new("u2"), "Bob"),
            ],
            transactions: Vec::new(),
            currency: Currency::USD,
        }
    }
}

/// Versioned interchange wrapper around a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    /// Format version tag
    pub version: String,

    /// When the document was exported
    pub export_date: DateTime<Utc>,

    /// The wrapped snapshot
    pub data: Snapshot,
}

/// Wrap a snapshot for export
pub fn export(snapshot: &Snapshot) -> SnapshotDocument {
    SnapshotDocument {
        version: FORMAT_VERSION.to_string(),
        export_date: Utc::now(),
        data: snapshot.clone(),
    }
}

/// Render a snapshot document as pretty-printed JSON
pub fn to_json(document: &SnapshotDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Decode and validate a snapshot document
///
/// Shape requirements: a top-level `data` object whose `users` and
/// `transactions` are arrays and whose `currency` is a string. Beyond
/// that, entries must decode into the typed model — a transaction of
/// unknown shape or an unrecognized currency code rejects the whole
/// document. Failures are structured [`Error::Validation`] values; a
/// malformed document never panics and never partially applies.
pub fn import(json: &str) -> Result<Snapshot> {
    let document: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::Validation(format!("invalid JSON: {}", e)))?;

    let data = match document.get("data") {
        Some(data) if data.is_object() => data,
        _ => {
            return Err(Error::Validation(
                "invalid data structure: missing data object".to_string(),
            ))
        }
    };

    if !data.get("users").map(|u| u.is_array()).unwrap_or(false) {
        return Err(Error::Validation(
            "invalid data: users must be an array".to_string(),
        ));
    }
    if !data
        .get("transactions")
        .map(|t| t.is_array())
        .unwrap_or(false)
    {
        return Err(Error::Validation(
            "invalid data: transactions must be an array".to_string(),
        ));
    }
    if !data.get("currency").map(|c| c.is_string()).unwrap_or(false) {
        return Err(Error::Validation(
            "invalid data: currency must be a string".to_string(),
        ));
    }

    serde_json::from_value(data.clone())
        .map_err(|e| Error::Validation(format!("invalid data: {}", e)))
}
