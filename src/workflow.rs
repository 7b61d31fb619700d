//! Action boundary for the presentation layer.
//!
//! A [`Registry`] is the explicitly passed store handle for one session: the
//! catalog snapshot, the SQLite connection, and the export path travel
//! together instead of living in module-level globals. The presentation layer
//! opens one `Registry`, lets the recognizer adapters and extraction
//! strategies produce the draft fields, and calls [`Registry::register`] on
//! commit.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

use crate::builder::{build_record, BuildError};
use crate::catalog::{load_catalog, Catalog, CatalogEntry, CatalogError};
use crate::config;
use crate::db::{
    fetch_all, fetch_latest, insert_record, open_database, open_memory_database, DatabaseError,
};
use crate::export::export_records;
use crate::models::{CaptureMethod, ExtractedFields, FormFields, Record};
use crate::recognize::RecognitionError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}

/// Whether the export artifact reflects the store after this registration.
///
/// A failed export does not roll back the committed insert; the divergence is
/// carried here so the presentation layer can flag it instead of hiding it.
#[derive(Debug, Clone, Serialize)]
pub enum ExportStatus {
    Written(PathBuf),
    Failed { path: PathBuf, reason: String },
}

impl ExportStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Result of one committed registration: the persisted record (re-read from
/// the store for the confirmation display) and the export outcome.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOutcome {
    pub record: Record,
    pub export: ExportStatus,
}

/// One session's store handle: catalog snapshot + connection + export path.
pub struct Registry {
    conn: Mutex<Connection>,
    catalog: Catalog,
    export_path: PathBuf,
}

impl Registry {
    /// Open a session rooted at the given directory.
    ///
    /// Loads the catalog first — a catalog schema failure is fatal, since no
    /// valid procedure selection can exist without it — then opens the store.
    pub fn open(dir: &Path) -> Result<Self, WorkflowError> {
        let catalog = load_catalog(&config::catalog_path_in(dir))?;
        let conn = open_database(&config::db_path_in(dir))?;
        Ok(Self {
            conn: Mutex::new(conn),
            catalog,
            export_path: config::export_path_in(dir),
        })
    }

    /// Open a session in the process working directory (the fixed filenames
    /// from [`config`]).
    pub fn open_in_working_dir() -> Result<Self, WorkflowError> {
        let catalog = load_catalog(&config::catalog_path())?;
        let conn = open_database(&config::db_path())?;
        Ok(Self {
            conn: Mutex::new(conn),
            catalog,
            export_path: config::export_path(),
        })
    }

    /// In-memory session with an explicit catalog (test isolation).
    pub fn in_memory(catalog: Catalog, export_path: PathBuf) -> Result<Self, WorkflowError> {
        let conn = open_memory_database()?;
        Ok(Self {
            conn: Mutex::new(conn),
            catalog,
            export_path,
        })
    }

    /// The immutable catalog snapshot loaded for this session.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Most recent registration, for display.
    pub fn latest(&self) -> Result<Option<Record>, WorkflowError> {
        Ok(fetch_latest(&self.conn())?)
    }

    /// Full history, newest first.
    pub fn history(&self) -> Result<Vec<Record>, WorkflowError> {
        Ok(fetch_all(&self.conn())?)
    }

    /// Commit one registration: build, insert, re-export the full history.
    ///
    /// Insert and export run under one lock so the export always reflects a
    /// consistent snapshot. Export failure is carried in the outcome, never
    /// rolled back and never swallowed. No step is retried.
    pub fn register(
        &self,
        extracted: &ExtractedFields,
        form: &FormFields,
        capture_method: CaptureMethod,
        selection: Option<&CatalogEntry>,
    ) -> Result<RegistrationOutcome, WorkflowError> {
        let record = build_record(
            extracted,
            form,
            capture_method,
            selection,
            Local::now().naive_local(),
        )?;

        // Critical section: insert + export as one unit
        let conn = self.conn();
        let id = insert_record(&conn, &record)?;
        let persisted = fetch_latest(&conn)?.ok_or_else(|| {
            DatabaseError::CorruptRow(format!("row {id} not visible after insert"))
        })?;

        let history = fetch_all(&conn)?;
        let export = match export_records(&history, &self.export_path) {
            Ok(()) => ExportStatus::Written(self.export_path.clone()),
            Err(e) => {
                tracing::warn!(
                    path = %self.export_path.display(),
                    error = %e,
                    "Export failed; store and export artifact now diverge"
                );
                ExportStatus::Failed {
                    path: self.export_path.clone(),
                    reason: e.to_string(),
                }
            }
        };

        Ok(RegistrationOutcome {
            record: persisted,
            export,
        })
    }

    /// A poisoned lock only means another caller panicked mid-action; the
    /// connection itself is still valid, so recover it.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::strategy_for;
    use crate::models::{ResidencyYear, ResidentRole};
    use crate::recognize::{MockTranscriber, SpeechTranscriber};
    use std::io::Write;

    fn test_catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry {
                code: "A1".into(),
                name: "Sutura".into(),
            },
            CatalogEntry {
                code: "A2".into(),
                name: "Biopsia".into(),
            },
        ])
    }

    fn test_form() -> FormFields {
        FormFields {
            residency_year: ResidencyYear::Fourth,
            hospital: "Hospital Italiano".to_string(),
            resident_role: ResidentRole::PrincipalSurgeon,
            instructor: "Dra. Vidal".to_string(),
        }
    }

    fn test_registry(dir: &Path) -> Registry {
        Registry::in_memory(test_catalog(), config::export_path_in(dir)).unwrap()
    }

    #[test]
    fn register_persists_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());

        let extracted = ExtractedFields {
            patient_name: "Juan Perez".into(),
            document_id: "12345".into(),
            birth_date_or_age: "45".into(),
        };
        let selection = registry.catalog().find_by_name("Sutura").cloned();

        let outcome = registry
            .register(
                &extracted,
                &test_form(),
                CaptureMethod::Image,
                selection.as_ref(),
            )
            .unwrap();

        assert_eq!(outcome.record.patient_name, "Juan Perez");
        assert_eq!(outcome.record.procedure_code, "A1");
        assert!(outcome.export.is_written());
        assert!(registry.export_path().exists());
        assert_eq!(registry.history().unwrap().len(), 1);
    }

    #[test]
    fn missing_selection_rejects_attempt_and_leaves_store_intact() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());

        let result = registry.register(
            &ExtractedFields::default(),
            &test_form(),
            CaptureMethod::Image,
            None,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::Build(BuildError::MissingSelection))
        ));
        assert!(registry.latest().unwrap().is_none());
        assert!(!registry.export_path().exists(), "no export without insert");
    }

    #[test]
    fn export_failure_keeps_committed_insert_and_flags_divergence() {
        let registry = Registry::in_memory(
            test_catalog(),
            PathBuf::from("/nonexistent/dir/procedimientos_exportados.csv"),
        )
        .unwrap();
        let selection = registry.catalog().find_by_code("A2").cloned();

        let outcome = registry
            .register(
                &ExtractedFields::default(),
                &test_form(),
                CaptureMethod::Audio,
                selection.as_ref(),
            )
            .unwrap();

        assert!(matches!(outcome.export, ExportStatus::Failed { .. }));
        assert_eq!(
            registry.history().unwrap().len(),
            1,
            "the insert stands even though export failed"
        );
    }

    #[test]
    fn export_row_count_tracks_history_after_each_registration() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());
        let selection = registry.catalog().find_by_name("Biopsia").cloned();

        for k in 1..=3 {
            registry
                .register(
                    &ExtractedFields::default(),
                    &test_form(),
                    CaptureMethod::Image,
                    selection.as_ref(),
                )
                .unwrap();

            let mut reader = csv::Reader::from_path(registry.export_path()).unwrap();
            assert_eq!(reader.records().count(), k, "full re-export after insert {k}");
        }
    }

    #[test]
    fn audio_dictation_flows_through_to_a_persisted_record() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());

        // Recognize, hand the editable text to extraction, then commit
        let stt = MockTranscriber::new("el paciente123 presenta documento 998877");
        let text = stt.transcribe(b"fake_wav").unwrap();
        let extracted = strategy_for(CaptureMethod::Audio).extract(&text);
        let selection = registry.catalog().find_by_name("Sutura").cloned();

        let outcome = registry
            .register(
                &extracted,
                &test_form(),
                CaptureMethod::Audio,
                selection.as_ref(),
            )
            .unwrap();

        assert_eq!(outcome.record.patient_name, "paciente123");
        assert_eq!(outcome.record.document_id, "998877");
        assert_eq!(outcome.record.birth_date_or_age, "");
        assert_eq!(outcome.record.capture_method, CaptureMethod::Audio);
    }

    #[test]
    fn unintelligible_audio_falls_back_to_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());

        let stt = MockTranscriber::unintelligible();
        let extracted = match stt.transcribe(b"fake_wav") {
            Ok(text) => strategy_for(CaptureMethod::Audio).extract(&text),
            Err(RecognitionError::UnintelligibleAudio) => ExtractedFields::default(),
            Err(e) => panic!("unexpected error: {e}"),
        };
        let selection = registry.catalog().find_by_name("Sutura").cloned();

        // The warning is user-visible but the registration still goes through
        let outcome = registry
            .register(
                &extracted,
                &test_form(),
                CaptureMethod::Audio,
                selection.as_ref(),
            )
            .unwrap();
        assert_eq!(outcome.record.patient_name, "");
    }

    #[test]
    fn ids_increase_across_registrations() {
        let dir = tempfile::tempdir().unwrap();
        let registry = test_registry(dir.path());
        let selection = registry.catalog().find_by_code("A1").cloned();

        let first = registry
            .register(
                &ExtractedFields::default(),
                &test_form(),
                CaptureMethod::Image,
                selection.as_ref(),
            )
            .unwrap();
        let second = registry
            .register(
                &ExtractedFields::default(),
                &test_form(),
                CaptureMethod::Image,
                selection.as_ref(),
            )
            .unwrap();
        assert!(second.record.id > first.record.id);
    }

    #[test]
    fn open_fails_fatally_on_catalog_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(config::catalog_path_in(dir.path())).unwrap();
        file.write_all(b"Codigo,Nombre\nA1,Sutura\n").unwrap();

        let result = Registry::open(dir.path());
        assert!(matches!(
            result,
            Err(WorkflowError::Catalog(CatalogError::MissingColumn { .. }))
        ));
        assert!(
            !config::db_path_in(dir.path()).exists(),
            "no store is created when the catalog is unusable"
        );
    }

    #[test]
    fn open_with_valid_catalog_initializes_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(config::catalog_path_in(dir.path())).unwrap();
        file.write_all(b"Codigo,Nombre,Habilitado\nA1,Sutura,SI\nA2,Biopsia,NO\n")
            .unwrap();

        let registry = Registry::open(dir.path()).unwrap();
        assert_eq!(registry.catalog().len(), 1, "only enabled entries load");
        assert!(config::db_path_in(dir.path()).exists());
        assert!(registry.latest().unwrap().is_none());
    }
}
