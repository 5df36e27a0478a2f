//! Snapshot generation and file export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use hearth_storage::{AccountRepository, Database, PersonRepository};

use crate::error::ExportError;
use crate::snapshot::{
    FinancialSummary, PersonSummary, Snapshot, SnapshotAccount, SNAPSHOT_VERSION,
};

/// Builds per-person snapshots and writes them to the export directory.
pub struct ExportService {
    people: PersonRepository,
    accounts: AccountRepository,
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(db: Arc<Database>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            people: PersonRepository::new(db.clone()),
            accounts: AccountRepository::new(db),
            export_dir: export_dir.into(),
        }
    }

    /// Build the snapshot for one person.
    ///
    /// Fails fast with [`ExportError::PersonNotFound`] when the id does
    /// not resolve.
    pub fn snapshot_for_person(&self, person_id: i64) -> Result<Snapshot, ExportError> {
        let person = self
            .people
            .find_by_id(person_id)?
            .ok_or(ExportError::PersonNotFound(person_id))?;

        let stored = self.accounts.list_by_person(person_id)?;

        let accounts: Vec<SnapshotAccount> = stored
            .into_iter()
            .map(|a| SnapshotAccount {
                id: a.id,
                title: a.title,
                amount: a.amount,
                // The exported polarity is the negation of the stored flag;
                // files already produced by the migration consumer carry it
                // this way.
                is_credit: !a.is_credit,
                account_type: a.account_type.as_ref().map(|t| t.name.clone()),
                notes: a.notes,
                created_at: a.created_at,
            })
            .collect();

        let total_credit: f64 = accounts
            .iter()
            .filter(|a| a.is_credit)
            .map(|a| a.amount)
            .sum();
        let total_debit: f64 = accounts
            .iter()
            .filter(|a| !a.is_credit)
            .map(|a| a.amount)
            .sum();

        Ok(Snapshot {
            version: SNAPSHOT_VERSION.to_string(),
            generated_at: Utc::now(),
            person: PersonSummary {
                id: person.id,
                name: person.name.clone(),
                phone: person.phone.clone(),
                email: person.email.clone(),
                has_photo: person
                    .photo_base64
                    .as_deref()
                    .map(|p| !p.is_empty())
                    .unwrap_or(false),
            },
            summary: FinancialSummary {
                total_accounts: accounts.len(),
                total_credit,
                total_debit,
                net_balance: total_credit - total_debit,
            },
            accounts,
        })
    }

    /// Serialize one person's snapshot as indented JSON.
    pub fn json_for_person(&self, person_id: i64) -> Result<String, ExportError> {
        let snapshot = self.snapshot_for_person(person_id)?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Write one person's snapshot to the export directory.
    ///
    /// The file name is derived from the person's name (letters and digits
    /// only) and their identity.
    pub fn export_person(&self, person_id: i64) -> Result<PathBuf, ExportError> {
        let snapshot = self.snapshot_for_person(person_id)?;
        let json = serde_json::to_string_pretty(&snapshot)?;

        let sanitized: String = snapshot
            .person
            .name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        let file_name = format!("migration_{}_{}.json", sanitized, person_id);

        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(file_name);
        std::fs::write(&path, json)?;

        info!(path = %path.display(), "Snapshot exported");
        Ok(path)
    }

    /// Export every person in the store; returns all produced paths.
    pub fn export_all(&self) -> Result<Vec<PathBuf>, ExportError> {
        let people = self.people.list()?;
        let mut paths = Vec::with_capacity(people.len());
        for person in people {
            paths.push(self.export_person(person.id)?);
        }
        Ok(paths)
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}
