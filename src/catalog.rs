//! Procedure catalog loader.
//!
//! Reads the allow-listed procedure code/name table from the catalog
//! spreadsheet and keeps only the enabled rows. The loaded [`Catalog`] is the
//! immutable session snapshot: every procedure selection must come from it,
//! which is what guarantees the persisted code/name invariant.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required catalog columns, in the order they are reported when missing.
const REQUIRED_COLUMNS: [&str; 3] = ["Codigo", "Nombre", "Habilitado"];

/// Enabled-flag sentinel; any other value disables the row.
const ENABLED_SENTINEL: &str = "SI";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column '{column}'")]
    MissingColumn { column: &'static str },
}

/// One allow-listed procedure eligible for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub name: String,
}

/// Immutable session snapshot of enabled catalog entries, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Entries in presentation order (name ascending).
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its display name (what the form's selector shows).
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Build a snapshot directly from entries (tests and fixtures).
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }
}

/// Load the catalog from a CSV source with columns Codigo / Nombre / Habilitado.
///
/// Fails with [`CatalogError::MissingColumn`] when a required column is absent
/// — fatal to the whole workflow, since no valid procedure selection can exist
/// without the catalog. Only rows whose Habilitado cell equals "SI" survive.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut column_index = [0usize; 3];
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        column_index[i] = headers
            .iter()
            .position(|h| h.trim() == *column)
            .ok_or(CatalogError::MissingColumn { column })?;
    }
    let [code_idx, name_idx, enabled_idx] = column_index;

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row?;
        let enabled = row.get(enabled_idx).unwrap_or("").trim();
        if enabled != ENABLED_SENTINEL {
            continue;
        }
        entries.push(CatalogEntry {
            code: row.get(code_idx).unwrap_or("").trim().to_string(),
            name: row.get(name_idx).unwrap_or("").trim().to_string(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(
        path = %path.display(),
        enabled = entries.len(),
        "Catalog loaded"
    );

    Ok(Catalog { entries })
}
