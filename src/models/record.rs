use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CaptureMethod, ResidencyYear, ResidentRole};

/// Patient fields recovered from recognized text.
///
/// Each field may be empty — extraction is heuristic and allowed to fail per
/// field; the user fills gaps manually before committing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub patient_name: String,
    pub document_id: String,
    pub birth_date_or_age: String,
}

/// Metadata the resident enters on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub residency_year: ResidencyYear,
    pub hospital: String,
    pub resident_role: ResidentRole,
    pub instructor: String,
}

/// A fully merged registration, not yet persisted (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub timestamp: NaiveDateTime,
    pub patient_name: String,
    pub document_id: String,
    pub birth_date_or_age: String,
    pub residency_year: ResidencyYear,
    pub hospital: String,
    pub resident_role: ResidentRole,
    pub instructor: String,
    pub procedure_code: String,
    pub procedure_name: String,
    pub capture_method: CaptureMethod,
}

/// One persisted procedure registration.
///
/// Immutable once stored: no update or delete path exists anywhere in the
/// crate. The id is assigned by the store, unique, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub patient_name: String,
    pub document_id: String,
    pub birth_date_or_age: String,
    pub residency_year: ResidencyYear,
    pub hospital: String,
    pub resident_role: ResidentRole,
    pub instructor: String,
    pub procedure_code: String,
    pub procedure_name: String,
    pub capture_method: CaptureMethod,
}

impl Record {
    /// Everything except the store-assigned id, for round-trip comparisons.
    pub fn fields(&self) -> NewRecord {
        NewRecord {
            timestamp: self.timestamp,
            patient_name: self.patient_name.clone(),
            document_id: self.document_id.clone(),
            birth_date_or_age: self.birth_date_or_age.clone(),
            residency_year: self.residency_year,
            hospital: self.hospital.clone(),
            resident_role: self.resident_role,
            instructor: self.instructor.clone(),
            procedure_code: self.procedure_code.clone(),
            procedure_name: self.procedure_name.clone(),
            capture_method: self.capture_method,
        }
    }
}
