//! Record builder — merges extracted and form fields into one registration.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::catalog::CatalogEntry;
use crate::models::{CaptureMethod, ExtractedFields, FormFields, NewRecord};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("no procedure selected from the catalog")]
    MissingSelection,
}

/// Merge extracted patient fields, form metadata, and the catalog selection
/// into one record, stamped with the given capture time.
///
/// Pure merge: all fields are set in one pass, no partial record is ever
/// produced. Selection must come from the session's loaded catalog, which is
/// what keeps the persisted code/name pair inside the snapshot; a missing
/// selection is rejected here defensively even though the form enforces it.
pub fn build_record(
    extracted: &ExtractedFields,
    form: &FormFields,
    capture_method: CaptureMethod,
    selection: Option<&CatalogEntry>,
    timestamp: NaiveDateTime,
) -> Result<NewRecord, BuildError> {
    let entry = selection.ok_or(BuildError::MissingSelection)?;

    Ok(NewRecord {
        timestamp,
        patient_name: extracted.patient_name.clone(),
        document_id: extracted.document_id.clone(),
        birth_date_or_age: extracted.birth_date_or_age.clone(),
        residency_year: form.residency_year,
        hospital: form.hospital.clone(),
        resident_role: form.resident_role,
        instructor: form.instructor.clone(),
        procedure_code: entry.code.clone(),
        procedure_name: entry.name.clone(),
        capture_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResidencyYear, ResidentRole};

    fn form() -> FormFields {
        FormFields {
            residency_year: ResidencyYear::Second,
            hospital: "Hospital Central".to_string(),
            resident_role: ResidentRole::PrincipalSurgeon,
            instructor: "Dr. Ruiz".to_string(),
        }
    }

    fn entry() -> CatalogEntry {
        CatalogEntry {
            code: "A1".to_string(),
            name: "Sutura".to_string(),
        }
    }

    fn capture_time() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-03-14 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn merges_all_fields_in_one_pass() {
        let extracted = ExtractedFields {
            patient_name: "Juan Perez".to_string(),
            document_id: "12345".to_string(),
            birth_date_or_age: "45".to_string(),
        };

        let record = build_record(
            &extracted,
            &form(),
            CaptureMethod::Image,
            Some(&entry()),
            capture_time(),
        )
        .unwrap();

        assert_eq!(record.patient_name, "Juan Perez");
        assert_eq!(record.document_id, "12345");
        assert_eq!(record.birth_date_or_age, "45");
        assert_eq!(record.residency_year, ResidencyYear::Second);
        assert_eq!(record.hospital, "Hospital Central");
        assert_eq!(record.resident_role, ResidentRole::PrincipalSurgeon);
        assert_eq!(record.instructor, "Dr. Ruiz");
        assert_eq!(record.procedure_code, "A1");
        assert_eq!(record.procedure_name, "Sutura");
        assert_eq!(record.capture_method, CaptureMethod::Image);
        assert_eq!(record.timestamp, capture_time());
    }

    #[test]
    fn missing_selection_is_rejected() {
        let result = build_record(
            &ExtractedFields::default(),
            &form(),
            CaptureMethod::Audio,
            None,
            capture_time(),
        );
        assert!(matches!(result, Err(BuildError::MissingSelection)));
    }

    #[test]
    fn absent_extracted_values_default_to_empty() {
        let record = build_record(
            &ExtractedFields::default(),
            &form(),
            CaptureMethod::Audio,
            Some(&entry()),
            capture_time(),
        )
        .unwrap();
        assert_eq!(record.patient_name, "");
        assert_eq!(record.document_id, "");
        assert_eq!(record.birth_date_or_age, "");
    }
}
