//! Line-based extraction for OCR text from scanned patient documents.

use super::ExtractionStrategy;
use crate::models::ExtractedFields;

/// Scans lines top-to-bottom for labeled fields like `Nombre: Juan Perez`.
///
/// For each field the first line containing its keyword wins; the value is
/// whatever follows the last colon on that line. Later matching lines are
/// ignored.
pub struct ImageTextStrategy;

impl ExtractionStrategy for ImageTextStrategy {
    fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            patient_name: labeled_line_value(text, &["nombre"]),
            document_id: labeled_line_value(text, &["documento"]),
            birth_date_or_age: labeled_line_value(text, &["nacimiento", "edad"]),
        }
    }
}

/// Value of the first line whose lowercase content contains any keyword.
///
/// The value is the substring after the last colon, trimmed; a matching line
/// without a colon yields the whole trimmed line. No match yields "".
fn labeled_line_value(text: &str, keywords: &[&str]) -> String {
    text.lines()
        .find(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
        .map(|line| match line.rsplit_once(':') {
            Some((_, value)) => value.trim().to_string(),
            None => line.trim().to_string(),
        })
        .unwrap_or_default()
}
