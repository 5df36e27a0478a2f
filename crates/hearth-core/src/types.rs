//! Core entity types: people, account types, and accounts.
//!
//! Identities are SQLite row ids. A freshly constructed entity carries
//! [`UNASSIGNED_ID`]; the storage layer assigns the real id on first save
//! and it is immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel identity for entities that have not been inserted yet.
pub const UNASSIGNED_ID: i64 = 0;

/// A person that accounts can be linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Photo blob as an encoded string. Never exported; only its presence is.
    pub photo_base64: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            phone: None,
            email: None,
            photo_base64: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == UNASSIGNED_ID
    }
}

/// A category for accounts (e.g. "Groceries", "Salary").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl AccountType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            description: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == UNASSIGNED_ID
    }
}

/// A single financial record.
///
/// `person` and `account_type` are a transient join: list operations
/// populate them from the referenced rows when the reference resolves,
/// and they are never written back to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    /// Polarity: `true` is credit (inflow), `false` is debit (outflow).
    pub is_credit: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub person_id: Option<i64>,
    pub account_type_id: Option<i64>,

    #[serde(skip)]
    pub person: Option<Person>,
    #[serde(skip)]
    pub account_type: Option<AccountType>,
}

impl Account {
    pub fn new(title: impl Into<String>, amount: f64, is_credit: bool) -> Self {
        Self {
            id: UNASSIGNED_ID,
            title: title.into(),
            amount,
            is_credit,
            notes: None,
            created_at: Utc::now(),
            person_id: None,
            account_type_id: None,
            person: None,
            account_type: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == UNASSIGNED_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_is_unassigned() {
        let person = Person::new("Alice");
        assert!(person.is_new());
        assert_eq!(person.name, "Alice");
        assert!(person.phone.is_none());
        assert!(person.photo_base64.is_none());
    }

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("Rent", 1200.0, false);
        assert!(account.is_new());
        assert_eq!(account.amount, 1200.0);
        assert!(!account.is_credit);
        assert!(account.person_id.is_none());
        assert!(account.person.is_none());
    }

    #[test]
    fn test_transient_relations_not_serialized() {
        let mut account = Account::new("Salary", 500.0, true);
        account.person = Some(Person::new("Bob"));

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("person").is_none());
        assert!(json.get("account_type").is_none());
        assert_eq!(json["title"], "Salary");
    }

    #[test]
    fn test_assigned_id_is_not_new() {
        let mut ty = AccountType::new("Utilities");
        assert!(ty.is_new());
        ty.id = 3;
        assert!(!ty.is_new());
    }
}
