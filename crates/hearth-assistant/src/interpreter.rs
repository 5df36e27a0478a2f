//! Interprets structured assistant replies into store mutations.
//!
//! A reply is expected to be a JSON object with an `actions` list and a
//! user-facing `message`. Decoding is all-or-nothing: if the text does not
//! match the schema, the whole reply is treated as a plain message with
//! zero actions. Individual actions with an unrecognized `type` are
//! skipped without erroring.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use hearth_core::types::{Account, AccountType, Person};
use hearth_storage::{AccountRepository, AccountTypeRepository, Database, PersonRepository};

use crate::error::AssistantError;

const DEFAULT_MESSAGE: &str = "Done!";
const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_NAME: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct AssistantReply {
    #[serde(default)]
    actions: Vec<Action>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Action {
    #[serde(rename_all = "camelCase")]
    CreateAccount {
        title: Option<String>,
        amount: Option<f64>,
        is_credit: Option<bool>,
        notes: Option<String>,
        person_name: Option<String>,
        account_type_name: Option<String>,
    },
    CreatePerson {
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    },
    CreateAccountType {
        name: Option<String>,
        description: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// The user-facing result of applying a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretOutcome {
    pub message: String,
    pub records_created: usize,
}

/// Applies assistant actions against the entity store.
///
/// Find-or-create resolution is not race-safe; usage is serialized,
/// single-flight per user action.
pub struct ActionInterpreter {
    people: PersonRepository,
    account_types: AccountTypeRepository,
    accounts: AccountRepository,
}

impl ActionInterpreter {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            people: PersonRepository::new(db.clone()),
            account_types: AccountTypeRepository::new(db.clone()),
            accounts: AccountRepository::new(db),
        }
    }

    /// Parse a raw assistant reply and apply its actions.
    ///
    /// Never fails on malformed input: anything that does not decode as a
    /// structured reply becomes the message itself.
    pub fn apply(&self, raw_reply: &str) -> Result<InterpretOutcome, AssistantError> {
        let clean = strip_fence(raw_reply);

        let reply: AssistantReply = match serde_json::from_str(&clean) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "Reply is not structured; treating as plain text");
                return Ok(InterpretOutcome {
                    message: raw_reply.to_string(),
                    records_created: 0,
                });
            }
        };

        let mut created = 0;
        for action in reply.actions {
            match action {
                Action::CreateAccount {
                    title,
                    amount,
                    is_credit,
                    notes,
                    person_name,
                    account_type_name,
                } => {
                    self.create_account(
                        title,
                        amount,
                        is_credit,
                        notes,
                        person_name,
                        account_type_name,
                    )?;
                    created += 1;
                }
                Action::CreatePerson { name, phone, email } => {
                    let mut person = Person::new(non_blank(name, DEFAULT_NAME));
                    person.phone = phone;
                    person.email = email;
                    self.people.save(&mut person)?;
                    created += 1;
                }
                Action::CreateAccountType { name, description } => {
                    let mut ty = AccountType::new(non_blank(name, DEFAULT_NAME));
                    ty.description = description;
                    self.account_types.save(&mut ty)?;
                    created += 1;
                }
                Action::Unknown => {
                    debug!("Skipping action with unrecognized type");
                }
            }
        }

        Ok(InterpretOutcome {
            message: reply
                .message
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            records_created: created,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_account(
        &self,
        title: Option<String>,
        amount: Option<f64>,
        is_credit: Option<bool>,
        notes: Option<String>,
        person_name: Option<String>,
        account_type_name: Option<String>,
    ) -> Result<(), AssistantError> {
        let person_id = match person_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Some(self.resolve_person(name)?),
            None => None,
        };

        let account_type_id = match account_type_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            Some(name) => Some(self.resolve_account_type(name)?),
            None => None,
        };

        // Amount is intentionally unchecked here; only the direct
        // user-input path requires a positive value.
        let mut account = Account::new(
            non_blank(title, DEFAULT_TITLE),
            amount.unwrap_or(0.0),
            is_credit.unwrap_or(false),
        );
        account.notes = notes;
        account.person_id = person_id;
        account.account_type_id = account_type_id;

        self.accounts.save(&mut account)?;
        Ok(())
    }

    /// Look up a person by case-insensitive exact name; create if absent.
    fn resolve_person(&self, name: &str) -> Result<i64, AssistantError> {
        let people = self.people.list()?;
        if let Some(person) = people.iter().find(|p| p.name.eq_ignore_ascii_case(name)) {
            return Ok(person.id);
        }

        let mut person = Person::new(name);
        let id = self.people.save(&mut person)?;
        debug!(name, id, "Created person during action resolution");
        Ok(id)
    }

    /// Same resolution pattern for account types.
    fn resolve_account_type(&self, name: &str) -> Result<i64, AssistantError> {
        let types = self.account_types.list()?;
        if let Some(ty) = types.iter().find(|t| t.name.eq_ignore_ascii_case(name)) {
            return Ok(ty.id);
        }

        let mut ty = AccountType::new(name);
        let id = self.account_types.save(&mut ty)?;
        debug!(name, id, "Created account type during action resolution");
        Ok(id)
    }
}

fn non_blank(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Strip a wrapping markdown code fence, if present.
///
/// The fence line itself (possibly carrying a language tag) and the
/// trailing fence are removed; everything is trimmed.
fn strip_fence(raw: &str) -> String {
    let text = raw.trim();
    if !text.starts_with("```") {
        return text.to_string();
    }

    let body = match text.find('\n') {
        Some(idx) => &text[idx + 1..],
        None => "",
    };
    let body = match body.rfind("```") {
        Some(idx) => &body[..idx],
        None => body,
    };
    body.trim().to_string()
}
