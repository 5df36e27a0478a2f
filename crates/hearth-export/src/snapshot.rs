//! Snapshot document types.
//!
//! Serialized as indented, camelCase JSON. The shape is versioned; any
//! breaking change bumps [`SNAPSHOT_VERSION`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// A versioned per-person export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub person: PersonSummary,
    pub summary: FinancialSummary,
    pub accounts: Vec<SnapshotAccount>,
}

/// Identity summary. Carries whether a photo exists, never its bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub has_photo: bool,
}

/// Derived totals over the snapshot's accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_accounts: usize,
    pub total_credit: f64,
    pub total_debit: f64,
    pub net_balance: f64,
}

/// One account as written to the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAccount {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub is_credit: bool,
    /// Resolved account-type name, when the reference resolves.
    pub account_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
