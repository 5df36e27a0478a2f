//! Repository implementations for SQLite-backed persistence.
//!
//! Each repository holds a shared [`Database`] handle. `save` is an upsert:
//! an entity carrying the unassigned sentinel id is inserted and receives a
//! fresh identity; any other id updates the existing row.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use hearth_core::error::HearthError;
use hearth_core::types::{Account, AccountType, Person};

use crate::db::Database;

/// Repository for people.
#[derive(Clone)]
pub struct PersonRepository {
    db: Arc<Database>,
}

impl PersonRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<Person>, HearthError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, phone, email, photo_base64 FROM people ORDER BY id")
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map([], row_to_person)
                .map_err(|e| HearthError::Storage(e.to_string()))?;

            let mut people = Vec::new();
            for row in rows {
                people.push(row.map_err(|e| HearthError::Storage(e.to_string()))?);
            }
            Ok(people)
        })
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Person>, HearthError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, phone, email, photo_base64 FROM people WHERE id = ?1",
                params![id],
                row_to_person,
            )
            .optional()
            .map_err(|e| HearthError::Storage(e.to_string()))
        })
    }

    /// Insert or update. Assigns and returns the new identity on insert.
    pub fn save(&self, person: &mut Person) -> Result<i64, HearthError> {
        if person.name.trim().is_empty() {
            return Err(HearthError::Validation(
                "Person name must not be empty.".to_string(),
            ));
        }

        self.db.with_conn(|conn| {
            if person.is_new() {
                conn.execute(
                    "INSERT INTO people (name, phone, email, photo_base64)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![person.name, person.phone, person.email, person.photo_base64],
                )
                .map_err(|e| HearthError::Storage(format!("Failed to insert person: {}", e)))?;
                person.id = conn.last_insert_rowid();
            } else {
                conn.execute(
                    "UPDATE people SET name = ?1, phone = ?2, email = ?3, photo_base64 = ?4
                     WHERE id = ?5",
                    params![
                        person.name,
                        person.phone,
                        person.email,
                        person.photo_base64,
                        person.id
                    ],
                )
                .map_err(|e| HearthError::Storage(format!("Failed to update person: {}", e)))?;
            }
            Ok(person.id)
        })
    }

    /// Delete a person, preserving their accounts.
    ///
    /// Every account referencing the person is rewritten to carry no
    /// person reference before the row is removed.
    pub fn delete(&self, id: i64) -> Result<(), HearthError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE accounts SET person_id = NULL WHERE person_id = ?1",
                params![id],
            )
            .map_err(|e| HearthError::Storage(format!("Failed to unlink accounts: {}", e)))?;
            conn.execute("DELETE FROM people WHERE id = ?1", params![id])
                .map_err(|e| HearthError::Storage(format!("Failed to delete person: {}", e)))?;
            Ok(())
        })
    }

    /// Number of accounts linked to the given person.
    pub fn account_count(&self, id: i64) -> Result<u64, HearthError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM accounts WHERE person_id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for account types.
#[derive(Clone)]
pub struct AccountTypeRepository {
    db: Arc<Database>,
}

impl AccountTypeRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<AccountType>, HearthError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, description FROM account_types ORDER BY id")
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map([], row_to_account_type)
                .map_err(|e| HearthError::Storage(e.to_string()))?;

            let mut types = Vec::new();
            for row in rows {
                types.push(row.map_err(|e| HearthError::Storage(e.to_string()))?);
            }
            Ok(types)
        })
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<AccountType>, HearthError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, description FROM account_types WHERE id = ?1",
                params![id],
                row_to_account_type,
            )
            .optional()
            .map_err(|e| HearthError::Storage(e.to_string()))
        })
    }

    pub fn save(&self, account_type: &mut AccountType) -> Result<i64, HearthError> {
        if account_type.name.trim().is_empty() {
            return Err(HearthError::Validation(
                "Account type name must not be empty.".to_string(),
            ));
        }

        self.db.with_conn(|conn| {
            if account_type.is_new() {
                conn.execute(
                    "INSERT INTO account_types (name, description) VALUES (?1, ?2)",
                    params![account_type.name, account_type.description],
                )
                .map_err(|e| {
                    HearthError::Storage(format!("Failed to insert account type: {}", e))
                })?;
                account_type.id = conn.last_insert_rowid();
            } else {
                conn.execute(
                    "UPDATE account_types SET name = ?1, description = ?2 WHERE id = ?3",
                    params![account_type.name, account_type.description, account_type.id],
                )
                .map_err(|e| {
                    HearthError::Storage(format!("Failed to update account type: {}", e))
                })?;
            }
            Ok(account_type.id)
        })
    }

    /// Delete an account type unconditionally.
    ///
    /// Callers are expected to check [`account_count`](Self::account_count)
    /// first and warn the user when accounts still reference the type.
    pub fn delete(&self, id: i64) -> Result<(), HearthError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM account_types WHERE id = ?1", params![id])
                .map_err(|e| {
                    HearthError::Storage(format!("Failed to delete account type: {}", e))
                })?;
            Ok(())
        })
    }

    /// Number of accounts referencing the given type.
    pub fn account_count(&self, id: i64) -> Result<u64, HearthError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM accounts WHERE account_type_id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for accounts.
#[derive(Clone)]
pub struct AccountRepository {
    db: Arc<Database>,
}

const ACCOUNT_COLUMNS: &str =
    "id, title, amount, is_credit, notes, created_at, person_id, account_type_id";

impl AccountRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All accounts with their person/account-type relations populated.
    pub fn list(&self) -> Result<Vec<Account>, HearthError> {
        self.db.with_conn(|conn| {
            let mut accounts = query_accounts(conn, None)?;
            populate_relations(conn, &mut accounts)?;
            Ok(accounts)
        })
    }

    /// Accounts linked to the given person, relations populated.
    pub fn list_by_person(&self, person_id: i64) -> Result<Vec<Account>, HearthError> {
        self.db.with_conn(|conn| {
            let mut accounts = query_accounts(conn, Some(person_id))?;
            populate_relations(conn, &mut accounts)?;
            Ok(accounts)
        })
    }

    pub fn save(&self, account: &mut Account) -> Result<i64, HearthError> {
        if account.title.trim().is_empty() {
            return Err(HearthError::Validation(
                "Account title must not be empty.".to_string(),
            ));
        }

        self.db.with_conn(|conn| {
            if account.is_new() {
                conn.execute(
                    "INSERT INTO accounts
                        (title, amount, is_credit, notes, created_at, person_id, account_type_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        account.title,
                        account.amount,
                        account.is_credit as i32,
                        account.notes,
                        account.created_at.timestamp(),
                        account.person_id,
                        account.account_type_id,
                    ],
                )
                .map_err(|e| HearthError::Storage(format!("Failed to insert account: {}", e)))?;
                account.id = conn.last_insert_rowid();
            } else {
                conn.execute(
                    "UPDATE accounts SET title = ?1, amount = ?2, is_credit = ?3, notes = ?4,
                        created_at = ?5, person_id = ?6, account_type_id = ?7
                     WHERE id = ?8",
                    params![
                        account.title,
                        account.amount,
                        account.is_credit as i32,
                        account.notes,
                        account.created_at.timestamp(),
                        account.person_id,
                        account.account_type_id,
                        account.id,
                    ],
                )
                .map_err(|e| HearthError::Storage(format!("Failed to update account: {}", e)))?;
            }
            Ok(account.id)
        })
    }

    pub fn delete(&self, id: i64) -> Result<(), HearthError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])
                .map_err(|e| HearthError::Storage(format!("Failed to delete account: {}", e)))?;
            Ok(())
        })
    }

    pub fn count(&self) -> Result<u64, HearthError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

// ============================================================================
// Row mapping and relation population
// ============================================================================

fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        photo_base64: row.get(4)?,
    })
}

fn row_to_account_type(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountType> {
    Ok(AccountType {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let created_at: i64 = row.get(5)?;
    Ok(Account {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        is_credit: row.get::<_, i64>(3)? != 0,
        notes: row.get(4)?,
        created_at: Utc
            .timestamp_opt(created_at, 0)
            .single()
            .unwrap_or_default(),
        person_id: row.get(6)?,
        account_type_id: row.get(7)?,
        person: None,
        account_type: None,
    })
}

fn query_accounts(
    conn: &Connection,
    person_id: Option<i64>,
) -> Result<Vec<Account>, HearthError> {
    let sql = match person_id {
        Some(_) => format!(
            "SELECT {} FROM accounts WHERE person_id = ?1 ORDER BY id",
            ACCOUNT_COLUMNS
        ),
        None => format!("SELECT {} FROM accounts ORDER BY id", ACCOUNT_COLUMNS),
    };

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| HearthError::Storage(e.to_string()))?;

    let mut accounts = Vec::new();
    let rows = match person_id {
        Some(id) => stmt
            .query_map(params![id], row_to_account)
            .map_err(|e| HearthError::Storage(e.to_string()))?,
        None => stmt
            .query_map([], row_to_account)
            .map_err(|e| HearthError::Storage(e.to_string()))?,
    };
    for row in rows {
        accounts.push(row.map_err(|e| HearthError::Storage(e.to_string()))?);
    }
    Ok(accounts)
}

/// Fill in the transient person/account-type fields.
///
/// Null or dangling references stay `None`; a broken reference is an absent
/// relation, not an error.
fn populate_relations(conn: &Connection, accounts: &mut [Account]) -> Result<(), HearthError> {
    let mut people_stmt = conn
        .prepare("SELECT id, name, phone, email, photo_base64 FROM people")
        .map_err(|e| HearthError::Storage(e.to_string()))?;
    let mut people: HashMap<i64, Person> = HashMap::new();
    let rows = people_stmt
        .query_map([], row_to_person)
        .map_err(|e| HearthError::Storage(e.to_string()))?;
    for row in rows {
        let person = row.map_err(|e| HearthError::Storage(e.to_string()))?;
        people.insert(person.id, person);
    }

    let mut types_stmt = conn
        .prepare("SELECT id, name, description FROM account_types")
        .map_err(|e| HearthError::Storage(e.to_string()))?;
    let mut types: HashMap<i64, AccountType> = HashMap::new();
    let rows = types_stmt
        .query_map([], row_to_account_type)
        .map_err(|e| HearthError::Storage(e.to_string()))?;
    for row in rows {
        let ty = row.map_err(|e| HearthError::Storage(e.to_string()))?;
        types.insert(ty.id, ty);
    }

    for account in accounts.iter_mut() {
        if let Some(pid) = account.person_id {
            account.person = people.get(&pid).cloned();
        }
        if let Some(tid) = account.account_type_id {
            account.account_type = types.get(&tid).cloned();
        }
    }

    Ok(())
}
