//! Validated input forms for the direct save paths.
//!
//! User-entered data is validated here before it ever reaches storage.
//! The assistant's action interpreter does not go through these forms;
//! its amount field is deliberately more permissive.

use chrono::Utc;

use crate::error::{HearthError, Result};
use crate::types::{Account, AccountType, Person, UNASSIGNED_ID};

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Input for creating or editing a person.
#[derive(Debug, Clone, Default)]
pub struct PersonForm {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_base64: Option<String>,
}

impl PersonForm {
    pub fn build(self) -> Result<Person> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(HearthError::Validation("Name is required.".to_string()));
        }
        Ok(Person {
            id: UNASSIGNED_ID,
            name,
            phone: none_if_blank(self.phone),
            email: none_if_blank(self.email),
            photo_base64: self.photo_base64,
        })
    }
}

/// Input for creating or editing an account type.
#[derive(Debug, Clone, Default)]
pub struct AccountTypeForm {
    pub name: String,
    pub description: Option<String>,
}

impl AccountTypeForm {
    pub fn build(self) -> Result<AccountType> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(HearthError::Validation("Name is required.".to_string()));
        }
        Ok(AccountType {
            id: UNASSIGNED_ID,
            name,
            description: none_if_blank(self.description),
        })
    }
}

/// Input for creating or editing an account.
///
/// The amount arrives as the raw text the user typed and must parse to a
/// number strictly greater than zero.
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub title: String,
    pub amount_text: String,
    pub is_credit: bool,
    pub notes: Option<String>,
    pub person_id: Option<i64>,
    pub account_type_id: Option<i64>,
}

impl AccountForm {
    pub fn build(self) -> Result<Account> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(HearthError::Validation("Title is required.".to_string()));
        }

        let amount: f64 = self.amount_text.trim().parse().map_err(|_| {
            HearthError::Validation("Amount must be a number.".to_string())
        })?;
        if amount <= 0.0 {
            return Err(HearthError::Validation(
                "Amount must be greater than zero.".to_string(),
            ));
        }

        Ok(Account {
            id: UNASSIGNED_ID,
            title,
            amount,
            is_credit: self.is_credit,
            notes: none_if_blank(self.notes),
            created_at: Utc::now(),
            person_id: self.person_id,
            account_type_id: self.account_type_id,
            person: None,
            account_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_form_rejects_blank_name() {
        let form = PersonForm {
            name: "   ".to_string(),
            ..PersonForm::default()
        };
        let err = form.build().unwrap_err();
        assert!(matches!(err, HearthError::Validation(_)));
    }

    #[test]
    fn test_person_form_trims_and_drops_blank_optionals() {
        let form = PersonForm {
            name: "  Alice  ".to_string(),
            phone: Some("  ".to_string()),
            email: Some(" alice@example.com ".to_string()),
            photo_base64: None,
        };
        let person = form.build().unwrap();
        assert_eq!(person.name, "Alice");
        assert!(person.phone.is_none());
        assert_eq!(person.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_account_type_form_rejects_blank_name() {
        let form = AccountTypeForm::default();
        assert!(form.build().is_err());
    }

    #[test]
    fn test_account_form_rejects_blank_title() {
        let form = AccountForm {
            amount_text: "10".to_string(),
            ..AccountForm::default()
        };
        assert!(form.build().is_err());
    }

    #[test]
    fn test_account_form_rejects_non_numeric_amount() {
        let form = AccountForm {
            title: "Rent".to_string(),
            amount_text: "lots".to_string(),
            ..AccountForm::default()
        };
        let err = form.build().unwrap_err();
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn test_account_form_rejects_zero_and_negative_amounts() {
        for amount in ["0", "-5.50"] {
            let form = AccountForm {
                title: "Rent".to_string(),
                amount_text: amount.to_string(),
                ..AccountForm::default()
            };
            let err = form.build().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        }
    }

    #[test]
    fn test_account_form_builds_valid_account() {
        let form = AccountForm {
            title: "Groceries".to_string(),
            amount_text: "42.75".to_string(),
            is_credit: false,
            notes: Some("weekly shop".to_string()),
            person_id: Some(2),
            account_type_id: None,
        };
        let account = form.build().unwrap();
        assert!(account.is_new());
        assert_eq!(account.amount, 42.75);
        assert_eq!(account.person_id, Some(2));
        assert_eq!(account.notes.as_deref(), Some("weekly shop"));
    }
}
