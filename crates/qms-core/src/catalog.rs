use crate::query::Schema;
use crate::records::{
    Audit, Document, Domain, NonConformance, ScheduleStatus, TrainingSession, UpcomingTask,
};
use crate::schemas;
use crate::seed;
use crate::settings::Settings;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("duplicate {domain} identifier: {id}")]
    DuplicateId { domain: Domain, id: String },
    #[error("{domain} record {id} has an empty title")]
    EmptyTitle { domain: Domain, id: String },
    #[error("{domain} record {id}: {reason}")]
    InvalidRecord {
        domain: Domain,
        id: String,
        reason: String,
    },
    #[error("task {id}: {reason}")]
    InvalidTask { id: u32, reason: String },
}

/// On-disk shape of a catalog. Sections that are absent load as empty stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub audits: Vec<Audit>,
    #[serde(default)]
    pub training: Vec<TrainingSession>,
    #[serde(default)]
    pub non_conformances: Vec<NonConformance>,
    #[serde(default)]
    pub tasks: Vec<UpcomingTask>,
}

/// The four domain stores plus the overview's task list, loaded together and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub documents: RecordStore<Document>,
    pub audits: RecordStore<Audit>,
    pub training: RecordStore<TrainingSession>,
    pub non_conformances: RecordStore<NonConformance>,
    pub tasks: Vec<UpcomingTask>,
}

impl Catalog {
    pub fn seeded() -> Self {
        Self {
            documents: RecordStore::new(&schemas::DOCUMENTS, seed::documents()),
            audits: RecordStore::new(&schemas::AUDITS, seed::audits()),
            training: RecordStore::new(&schemas::TRAINING, seed::training_sessions()),
            non_conformances: RecordStore::new(
                &schemas::NON_CONFORMANCES,
                seed::non_conformances(),
            ),
            tasks: seed::tasks(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, CatalogError> {
        validate_snapshot(&snapshot)?;
        Ok(Self {
            documents: RecordStore::new(&schemas::DOCUMENTS, snapshot.documents),
            audits: RecordStore::new(&schemas::AUDITS, snapshot.audits),
            training: RecordStore::new(&schemas::TRAINING, snapshot.training),
            non_conformances: RecordStore::new(
                &schemas::NON_CONFORMANCES,
                snapshot.non_conformances,
            ),
            tasks: snapshot.tasks,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            documents = catalog.documents.len(),
            audits = catalog.audits.len(),
            training = catalog.training.len(),
            non_conformances = catalog.non_conformances.len(),
            tasks = catalog.tasks.len(),
            "catalog snapshot loaded"
        );
        Ok(catalog)
    }

    /// Snapshot file when the settings name one, built-in records otherwise.
    pub fn load(settings: &Settings) -> Result<Self, CatalogError> {
        match &settings.data_path {
            Some(path) => Self::from_path(path),
            None => {
                tracing::debug!("using built-in catalog");
                Ok(Self::seeded())
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            documents: self.documents.records().to_vec(),
            audits: self.audits.records().to_vec(),
            training: self.training.records().to_vec(),
            non_conformances: self.non_conformances.records().to_vec(),
            tasks: self.tasks.clone(),
        }
    }

    pub fn len_of(&self, domain: Domain) -> usize {
        match domain {
            Domain::Documents => self.documents.len(),
            Domain::Audits => self.audits.len(),
            Domain::Training => self.training.len(),
            Domain::NonConformance => self.non_conformances.len(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn validate_snapshot(snapshot: &Snapshot) -> Result<(), CatalogError> {
    validate_common(&schemas::DOCUMENTS, &snapshot.documents, |doc| &doc.title)?;
    validate_common(&schemas::AUDITS, &snapshot.audits, |audit| &audit.title)?;
    validate_common(&schemas::TRAINING, &snapshot.training, |session| {
        &session.title
    })?;
    validate_common(
        &schemas::NON_CONFORMANCES,
        &snapshot.non_conformances,
        |nc| &nc.title,
    )?;

    for audit in &snapshot.audits {
        if audit.completed_date.is_some() && audit.status != ScheduleStatus::Completed {
            return Err(invalid(
                Domain::Audits,
                audit.id.to_string(),
                format!("completion date set while status is {}", audit.status),
            ));
        }
    }

    for session in &snapshot.training {
        if session.completion_rate > 100 {
            return Err(invalid(
                Domain::Training,
                session.id.to_string(),
                format!("completion rate {} exceeds 100", session.completion_rate),
            ));
        }
        if session.attendees > session.max_attendees {
            return Err(invalid(
                Domain::Training,
                session.id.to_string(),
                format!(
                    "{} attendees exceed capacity of {}",
                    session.attendees, session.max_attendees
                ),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for task in &snapshot.tasks {
        if task.title.trim().is_empty() {
            return Err(CatalogError::InvalidTask {
                id: task.id,
                reason: "empty title".to_string(),
            });
        }
        if !task_ids.insert(task.id) {
            return Err(CatalogError::InvalidTask {
                id: task.id,
                reason: "duplicate identifier".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_common<R: 'static>(
    schema: &Schema<R>,
    records: &[R],
    title: impl Fn(&R) -> &String,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for record in records {
        let id = (schema.identifier)(record);
        if title(record).trim().is_empty() {
            return Err(CatalogError::EmptyTitle {
                domain: schema.domain,
                id,
            });
        }
        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateId {
                domain: schema.domain,
                id,
            });
        }
    }
    Ok(())
}

fn invalid(domain: Domain, id: String, reason: String) -> CatalogError {
    CatalogError::InvalidRecord { domain, id, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_passes_validation() {
        let snapshot = Catalog::seeded().snapshot();
        let reloaded = Catalog::from_snapshot(snapshot).expect("valid seed");
        assert_eq!(reloaded.len_of(Domain::Documents), 5);
        assert_eq!(reloaded.len_of(Domain::NonConformance), 5);
        assert_eq!(reloaded.tasks.len(), 3);
    }

    #[test]
    fn missing_sections_load_empty() {
        let catalog = Catalog::from_json(r#"{"documents": []}"#).expect("parse");
        assert!(catalog.audits.is_empty());
        assert!(catalog.non_conformances.is_empty());
        assert!(catalog.tasks.is_empty());
    }

    #[test]
    fn tasks_section_parses_priorities() {
        let catalog = Catalog::from_json(
            r#"{"tasks": [{"id": 7, "title": "Calibration Review", "dueDate": "2024-03-01", "priority": "high"}]}"#,
        )
        .expect("parse");
        assert_eq!(catalog.tasks[0].priority, crate::records::Priority::High);
        assert!(catalog.documents.is_empty());
    }

    #[test]
    fn duplicate_task_identifiers_are_rejected() {
        let mut snapshot = Catalog::seeded().snapshot();
        snapshot.tasks[2].id = 1;
        let err = Catalog::from_snapshot(snapshot).unwrap_err();
        assert_eq!(err.to_string(), "task 1: duplicate identifier");
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut snapshot = Catalog::seeded().snapshot();
        snapshot.non_conformances[1].id = "NC-2024-001".to_string();
        let err = Catalog::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateId {
                domain: Domain::NonConformance,
                ref id,
            } if id == "NC-2024-001"
        ));
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut snapshot = Catalog::seeded().snapshot();
        snapshot.documents[2].title = "   ".to_string();
        let err = Catalog::from_snapshot(snapshot).unwrap_err();
        assert_eq!(err.to_string(), "documents record 3 has an empty title");
    }

    #[test]
    fn completion_date_requires_completed_status() {
        let mut snapshot = Catalog::seeded().snapshot();
        snapshot.audits[1].completed_date = snapshot.audits[0].completed_date;
        let err = Catalog::from_snapshot(snapshot).unwrap_err();
        assert_eq!(
            err.to_string(),
            "audits record 2: completion date set while status is scheduled"
        );
    }

    #[test]
    fn overbooked_training_is_rejected() {
        let mut snapshot = Catalog::seeded().snapshot();
        snapshot.training[4].attendees = 16;
        let err = Catalog::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { domain: Domain::Training, .. }));
    }

    #[test]
    fn load_without_data_path_uses_seed() {
        let catalog = Catalog::load(&Settings::default()).expect("load");
        assert_eq!(catalog.audits.len(), 5);
    }
}
