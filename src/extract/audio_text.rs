//! Token-based extraction for speech transcripts.

use super::ExtractionStrategy;
use crate::models::ExtractedFields;

/// Scans whitespace-delimited tokens of a dictated registration.
///
/// The patient name comes back as the matching token itself (not the value
/// following it) — long-standing behavior that recorded dictations depend on,
/// preserved verbatim. Birth date is never extracted from audio.
pub struct AudioTextStrategy;

impl ExtractionStrategy for AudioTextStrategy {
    fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            patient_name: text
                .split_whitespace()
                .find(|token| token.to_lowercase().contains("paciente"))
                .unwrap_or_default()
                .to_string(),
            document_id: text
                .split_whitespace()
                .find(|token| token.chars().all(|c| c.is_ascii_digit()))
                .unwrap_or_default()
                .to_string(),
            birth_date_or_age: String::new(),
        }
    }
}
