//! Spreadsheet export of the full registration history.
//!
//! Regenerated wholesale after each successful registration — a truncating
//! overwrite of the fixed export path, never an incremental append. Cost is
//! O(total records) per registration, which is acceptable at logbook scale.

use std::path::Path;

use thiserror::Error;

use crate::db::repository::{COLUMNS, TIMESTAMP_FORMAT};
use crate::models::Record;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error writing export: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Serialize the records (already id-descending from the store) to the export
/// spreadsheet, overwriting any prior artifact.
pub fn export_records(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.patient_name.clone(),
            record.document_id.clone(),
            record.birth_date_or_age.clone(),
            record.residency_year.as_str().to_string(),
            record.hospital.clone(),
            record.resident_role.as_str().to_string(),
            record.instructor.clone(),
            record.procedure_code.clone(),
            record.procedure_name.clone(),
            record.capture_method.as_str().to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "Export written");
    Ok(())
}
